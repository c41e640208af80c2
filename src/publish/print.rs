use html_escape::encode_text;
use serde::{Deserialize, Serialize};

use crate::cheatsheet::{paginate, Block, Page, Section};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    /// Heading subtitle printed on every page
    pub subtitle: String,
    /// Label shown inside the notes area on page 1
    pub notes_label: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            subtitle: "EE4216 Hardware for IoT \u{2022} Exam Cheat Sheet".to_string(),
            notes_label: "Handwritten Notes Area".to_string(),
        }
    }
}

fn render_section(section: &Section) -> String {
    let mut html = format!(
        "      <section class=\"sheet-section\">\n        <h2>{}</h2>\n",
        encode_text(&section.category)
    );

    for item in &section.items {
        html.push_str("        <div class=\"item\">\n");
        html.push_str(&format!(
            "          <h3>{}</h3>\n",
            encode_text(&item.title)
        ));
        if !item.code.is_empty() {
            html.push_str(&format!(
                "          <pre><code>{}</code></pre>\n",
                encode_text(&item.code)
            ));
        }
        if !item.explanation.is_empty() {
            html.push_str(&format!(
                "          <p>{}</p>\n",
                encode_text(&item.explanation)
            ));
        }
        html.push_str("        </div>\n");
    }

    html.push_str("      </section>\n");
    html
}

fn render_page(page: &Page<'_>, options: &PrintOptions) -> String {
    let mut html = format!(
        "  <div class=\"page\">\n    <header>\n      <h1>Cheat Sheet - Page {}</h1>\n      <span class=\"subtitle\">{}</span>\n    </header>\n    <div class=\"grid\">\n",
        page.number(),
        encode_text(&options.subtitle)
    );

    for column in page.columns() {
        html.push_str("    <div class=\"column\">\n");
        for block in column {
            match block {
                Block::Section(placed) => html.push_str(&render_section(placed.section)),
                Block::NotesArea => html.push_str(&format!(
                    "      <div class=\"notes\"><span>{}</span></div>\n",
                    encode_text(&options.notes_label)
                )),
            }
        }
        html.push_str("    </div>\n");
    }

    html.push_str("    </div>\n  </div>\n");
    html
}

/// Render the paginated cheat sheet as a print-ready HTML document.
///
/// One `.page` element per four sections, sized for A4 landscape with a
/// page break after each.
pub fn render_print_html(sections: &[Section], options: &PrintOptions) -> String {
    let pages: String = paginate(sections)
        .iter()
        .map(|page| render_page(page, options))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Cheat Sheet</title>
  <style>
    @page {{
      size: A4 landscape;
      margin: 5mm;
    }}
    * {{
      box-sizing: border-box;
    }}
    body {{
      font-family: 'Helvetica Neue', Arial, sans-serif;
      font-size: 8px;
      line-height: 1.25;
      color: #1e293b;
      margin: 0;
    }}
    .page {{
      width: 100%;
      height: 200mm;
      padding: 5mm;
      display: flex;
      flex-direction: column;
      overflow: hidden;
      page-break-after: always;
    }}
    .page:last-child {{
      page-break-after: auto;
    }}
    header {{
      display: flex;
      justify-content: space-between;
      border-bottom: 2px solid #003d7c;
      padding-bottom: 2px;
      margin-bottom: 6px;
    }}
    header h1 {{
      font-size: 14px;
      text-transform: uppercase;
      color: #003d7c;
      margin: 0;
    }}
    .subtitle {{
      font-family: monospace;
      font-size: 8px;
      color: #64748b;
      padding-top: 6px;
    }}
    .grid {{
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 8px;
      flex-grow: 1;
    }}
    .column {{
      display: flex;
      flex-direction: column;
      gap: 6px;
    }}
    .sheet-section {{
      border: 1px solid #cbd5e1;
      border-radius: 4px;
      padding: 4px;
      page-break-inside: avoid;
    }}
    .sheet-section h2 {{
      font-size: 10px;
      color: #ef7c00;
      margin: 0 0 4px 0;
      text-transform: uppercase;
    }}
    .item h3 {{
      font-size: 9px;
      margin: 2px 0;
    }}
    pre {{
      background: #f1f5f9;
      padding: 2px 4px;
      margin: 0;
      white-space: pre-wrap;
      font-size: 7.5px;
    }}
    code {{
      font-family: 'Fira Code', 'Consolas', monospace;
    }}
    .item p {{
      margin: 2px 0 4px 0;
    }}
    .notes {{
      border: 2px dashed #e2e8f0;
      border-radius: 4px;
      flex-grow: 1;
      min-height: 50px;
      display: flex;
      align-items: center;
      justify-content: center;
    }}
    .notes span {{
      font-size: 9px;
      font-weight: bold;
      color: #cbd5e1;
      text-transform: uppercase;
    }}
  </style>
</head>
<body>
{pages}</body>
</html>"#,
        pages = pages,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheatsheet::{default_sections, Item};

    #[test]
    fn test_one_page_per_four_sections() {
        let html = render_print_html(&default_sections(), &PrintOptions::default());
        assert_eq!(html.matches("<div class=\"page\">").count(), 2);
        assert!(html.contains("Cheat Sheet - Page 1"));
        assert!(html.contains("Cheat Sheet - Page 2"));
        assert!(!html.contains("Cheat Sheet - Page 3"));
    }

    #[test]
    fn test_notes_area_only_on_first_page() {
        let html = render_print_html(&default_sections(), &PrintOptions::default());
        assert_eq!(html.matches("<div class=\"notes\">").count(), 1);
        let notes_at = html.find("<div class=\"notes\">").unwrap();
        let second_page_at = html.find("Cheat Sheet - Page 2").unwrap();
        assert!(notes_at < second_page_at);
    }

    #[test]
    fn test_empty_sheet_still_renders_a_page() {
        let html = render_print_html(&[], &PrintOptions::default());
        assert_eq!(html.matches("<div class=\"page\">").count(), 1);
        assert!(!html.contains("sheet-section\""));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let sections = vec![Section::new(
            "<script>alert(1)</script>",
            vec![Item::new("a & b", "if (x < 3 && y > 2) {}", "<b>bold</b>")],
        )];
        let html = render_print_html(&sections, &PrintOptions::default());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("x &lt; 3 &amp;&amp; y &gt; 2"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
