//! Fixed-capacity page layout for the cheat sheet
//!
//! Each landscape page holds four section slots laid out over three columns:
//!
//! ```text
//! | slot 0 | slot 2            | slot 3 |
//! | slot 1 | notes (page 1 only)|        |
//! ```
//!
//! Slot `k` of page `p` holds the section at global index `p * 4 + k`.

use super::models::Section;

pub const SECTIONS_PER_PAGE: usize = 4;
pub const COLUMNS: usize = 3;

/// Number of pages needed for `section_count` sections. Never zero.
pub fn page_count(section_count: usize) -> usize {
    section_count.max(1).div_ceil(SECTIONS_PER_PAGE)
}

/// A section placed in a page slot, with its index in the full list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSection<'a> {
    pub index: usize,
    pub section: &'a Section,
}

/// What a column renders, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    Section(PlacedSection<'a>),
    NotesArea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub index: usize,
    pub slots: [Option<PlacedSection<'a>>; SECTIONS_PER_PAGE],
}

impl<'a> Page<'a> {
    /// The free-form notes area sits under slot 2 on the first page only
    pub fn has_notes_area(&self) -> bool {
        self.index == 0
    }

    /// Human page number, starting at 1
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Blocks for each of the three columns. Empty slots are left out.
    pub fn columns(&self) -> [Vec<Block<'a>>; COLUMNS] {
        let section = |k: usize| self.slots[k].map(Block::Section);

        let first: Vec<Block<'a>> = [section(0), section(1)].into_iter().flatten().collect();

        let mut second: Vec<Block<'a>> = section(2).into_iter().collect();
        if self.has_notes_area() {
            second.push(Block::NotesArea);
        }

        let third: Vec<Block<'a>> = section(3).into_iter().collect();

        [first, second, third]
    }
}

/// Lay out page `page_index`. Slots past the end of the list are empty.
pub fn page(sections: &[Section], page_index: usize) -> Page<'_> {
    let base = page_index * SECTIONS_PER_PAGE;
    let slots = std::array::from_fn(|k| {
        let index = base + k;
        sections
            .get(index)
            .map(|section| PlacedSection { index, section })
    });
    Page {
        index: page_index,
        slots,
    }
}

/// All pages, in order
pub fn paginate(sections: &[Section]) -> Vec<Page<'_>> {
    (0..page_count(sections.len()))
        .map(|p| page(sections, p))
        .collect()
}

/// Page that shows the section at `section_index`
pub fn page_of(section_index: usize) -> usize {
    section_index / SECTIONS_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(n: usize) -> Vec<Section> {
        (0..n)
            .map(|i| Section::new(format!("S{}", i), Vec::new()))
            .collect()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(4), 1);
        assert_eq!(page_count(5), 2);
        assert_eq!(page_count(8), 2);
        assert_eq!(page_count(9), 3);
        assert_eq!(page_count(13), 4);
    }

    #[test]
    fn test_page_count_matches_formula() {
        for n in 0..200usize {
            let expected = (n.max(1) + SECTIONS_PER_PAGE - 1) / SECTIONS_PER_PAGE;
            assert_eq!(page_count(n), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let list = sections(0);
        let pages = paginate(&list);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].occupied(), 0);
        assert!(pages[0].has_notes_area());
        let columns = pages[0].columns();
        assert!(columns[0].is_empty());
        assert_eq!(columns[1], vec![Block::NotesArea]);
        assert!(columns[2].is_empty());
    }

    #[test]
    fn test_slot_assignment_is_positional() {
        let list = sections(13);
        let pages = paginate(&list);
        let occupancy: Vec<usize> = pages.iter().map(|p| p.occupied()).collect();
        assert_eq!(occupancy, vec![4, 4, 4, 1]);

        for p in &pages {
            for (k, slot) in p.slots.iter().enumerate() {
                if let Some(placed) = slot {
                    assert_eq!(placed.index, p.index * SECTIONS_PER_PAGE + k);
                    assert_eq!(placed.section.category, format!("S{}", placed.index));
                }
            }
        }
    }

    #[test]
    fn test_column_layout() {
        let list = sections(8);
        let first = page(&list, 0);
        let columns = first.columns();
        assert_eq!(columns[0].len(), 2);
        assert_eq!(columns[1].len(), 2);
        assert_eq!(columns[1][1], Block::NotesArea);
        assert_eq!(columns[2].len(), 1);

        let second = page(&list, 1);
        let columns = second.columns();
        assert_eq!(columns[1].len(), 1);
        assert!(!columns[1].contains(&Block::NotesArea));
        match columns[2][0] {
            Block::Section(placed) => assert_eq!(placed.index, 7),
            Block::NotesArea => panic!("notes area in third column"),
        }
    }

    #[test]
    fn test_page_is_deterministic() {
        let list = sections(6);
        assert_eq!(page(&list, 1), page(&list, 1));
    }

    #[test]
    fn test_page_of() {
        assert_eq!(page_of(0), 0);
        assert_eq!(page_of(3), 0);
        assert_eq!(page_of(4), 1);
        assert_eq!(page_of(12), 3);
    }
}
