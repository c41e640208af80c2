use super::models::{Concept, ConceptCategory};

static CONCEPTS: [Concept; 10] = [
    Concept {
        id: "mqtt",
        title: "MQTT (Message Queuing Telemetry Transport)",
        category: ConceptCategory::Protocols,
        definition: "A lightweight, publish-subscribe network protocol. Designed for low-bandwidth, high-latency networks. Devices (Clients) exchange messages via a central Broker.",
        key_points: &[
            "Publish/Subscribe: Decoupled communication.",
            "Topics: Hierarchical strings (e.g., \"home/livingroom/temp\").",
            "QoS 0: At most once (Fire & Forget).",
            "QoS 1: At least once (Guaranteed delivery, duplicates possible).",
            "QoS 2: Exactly once (Guaranteed, no duplicates).",
            "Keep-Alive: Client must ping broker periodically to stay connected.",
        ],
        pitfalls: &[
            "Blocking Loop: `client.loop()` must run frequently. Do not use `delay()` in the main loop.",
            "Topic Formats: Topics are case-sensitive.",
        ],
        code_snippet: Some(
            "// In loop()\nif (!client.connected()) reconnect();\nclient.loop(); // ESSENTIAL\n\n// Publishing\nclient.publish(\"sensors/temp\", \"25.5\");\n\n// Subscribing\nclient.subscribe(\"controls/light\");",
        ),
    },
    Concept {
        id: "http",
        title: "HTTP (Hypertext Transfer Protocol)",
        category: ConceptCategory::Protocols,
        definition: "A request-response protocol. The ESP32 (Client) requests data from a Server (GET) or sends data to it (POST).",
        key_points: &[
            "Stateless: Each connection is new; no memory of previous requests.",
            "Methods: GET (Read), POST (Create), PUT (Update), DELETE.",
            "Headers: Metadata (e.g., `Content-Type: application/json`).",
            "Response Codes: 200 (OK), 404 (Not Found), 500 (Server Error).",
        ],
        pitfalls: &[],
        code_snippet: Some(
            "HTTPClient http;\nhttp.begin(\"http://api.site.com/data\");\nint code = http.GET();\n\nif (code == 200) {\n  String payload = http.getString();\n}\nhttp.end(); // Free resources",
        ),
    },
    Concept {
        id: "tasks",
        title: "FreeRTOS Tasks",
        category: ConceptCategory::Rtos,
        definition: "Independent threads of execution. The scheduler switches between them to create multitasking.",
        key_points: &[
            "Infinite Loop: Tasks usually run forever `while(1)`.",
            "Priorities: Higher number = Higher priority.",
            "Stack Size: Defined in words (not bytes).",
            "Core Pinning: Can run on Core 0 or Core 1.",
        ],
        pitfalls: &[
            "Watchdog Reset: High priority tasks MUST yield (using `vTaskDelay`) or the Watchdog Timer (WDT) will reset the ESP32.",
        ],
        code_snippet: Some(
            "void myTask(void *p) {\n  while(1) {\n    // Do work\n    vTaskDelay(100 / portTICK_PERIOD_MS); // Yield\n  }\n}\n\nxTaskCreate(myTask, \"Name\", 2048, NULL, 1, NULL);",
        ),
    },
    Concept {
        id: "queues",
        title: "FreeRTOS Queues",
        category: ConceptCategory::Rtos,
        definition: "A FIFO (First-In, First-Out) buffer to safely send data between tasks.",
        key_points: &[
            "Thread Safe: Handles concurrency automatically.",
            "Copy by Value: Data is copied into the queue, not just referenced.",
            "Blocking: `xQueueReceive` waits if empty; `xQueueSend` waits if full.",
        ],
        pitfalls: &[],
        code_snippet: Some(
            "QueueHandle_t q = xQueueCreate(10, sizeof(int));\n\n// Task A (Send)\nint val = 100;\nxQueueSend(q, &val, portMAX_DELAY);\n\n// Task B (Receive)\nint rx;\nif (xQueueReceive(q, &rx, portMAX_DELAY)) {\n  // Process rx\n}",
        ),
    },
    Concept {
        id: "semaphores",
        title: "Semaphores & Mutexes",
        category: ConceptCategory::Rtos,
        definition: "Synchronization tools. Semaphores signal events; Mutexes protect shared resources.",
        key_points: &[
            "Binary Semaphore: Flag (0 or 1). \"Give\" to signal, \"Take\" to wait.",
            "Mutex: Like a token. Only one task can hold it at a time. Prevents race conditions on global variables.",
            "ISR: Use `FromISR` versions inside interrupts.",
        ],
        pitfalls: &[],
        code_snippet: Some(
            "SemaphoreHandle_t mutex = xSemaphoreCreateMutex();\n\n// Access shared resource\nif (xSemaphoreTake(mutex, portMAX_DELAY)) {\n  // Critical section\n  globalVar++;\n  xSemaphoreGive(mutex);\n}",
        ),
    },
    Concept {
        id: "dht",
        title: "DHT11 / DHT22 Sensors",
        category: ConceptCategory::Hardware,
        definition: "Digital temperature and humidity sensors using a proprietary single-wire protocol.",
        key_points: &[
            "Wiring: VCC (3.3V/5V), GND, Data. Data pin needs a 10k Pull-Up resistor.",
            "Timing: DHT11 (1Hz sampling), DHT22 (0.5Hz sampling).",
            "Accuracy: DHT22 is more accurate than DHT11.",
        ],
        pitfalls: &[
            "Reading too fast returns old data or errors.",
            "Always check `isnan()` on results.",
        ],
        code_snippet: Some(
            "#include \"DHT.h\"\n#define DHTPIN 4\n#define DHTTYPE DHT22\nDHT dht(DHTPIN, DHTTYPE);\n\nvoid setup() { dht.begin(); }\nvoid loop() {\n  float h = dht.readHumidity();\n  float t = dht.readTemperature();\n  if (isnan(h) || isnan(t)) Serial.println(\"Fail\");\n  delay(2000);\n}",
        ),
    },
    Concept {
        id: "neopixel",
        title: "NeoPixel (WS2812B) RGB LEDs",
        category: ConceptCategory::Hardware,
        definition: "Addressable RGB LEDs where each pixel is controlled individually via a single data line.",
        key_points: &[
            "Daisy Chain: DOUT of one connects to DIN of next.",
            "Power: 5V required. High current draw (up to 60mA per pixel white).",
            "Logic: 5V logic preferred, but ESP32 3.3V usually works.",
            "Update: Changes are not visible until `strip.show()` is called.",
        ],
        pitfalls: &[],
        code_snippet: Some(
            "#include <Adafruit_NeoPixel.h>\n#define PIN 5\n#define NUM 8\nAdafruit_NeoPixel strip(NUM, PIN, NEO_GRB + NEO_KHZ800);\n\nvoid setup() {\n  strip.begin();\n  strip.setBrightness(50);\n}\nvoid loop() {\n  strip.setPixelColor(0, strip.Color(255, 0, 0)); // Red\n  strip.show(); \n}",
        ),
    },
    Concept {
        id: "soil",
        title: "Capacitive Soil Moisture",
        category: ConceptCategory::Hardware,
        definition: "Measures soil moisture content based on capacitance changes. Analog output.",
        key_points: &[
            "Capacitive vs Resistive: Capacitive resists corrosion better.",
            "Output: Analog voltage. High value = Dry, Low value = Wet (Inverse logic usually).",
            "Calibration: Measure \"Air\" value (0%) and \"Water\" value (100%) to map.",
        ],
        pitfalls: &[],
        code_snippet: Some(
            "const int AIR_VAL = 3500; // Measure this\nconst int WATER_VAL = 1500; // Measure this\n\nvoid loop() {\n  int raw = analogRead(34);\n  int percent = map(raw, AIR_VAL, WATER_VAL, 0, 100);\n  percent = constrain(percent, 0, 100);\n  Serial.printf(\"Moisture: %d%%\\n\", percent);\n}",
        ),
    },
    Concept {
        id: "isr",
        title: "GPIO Interrupts",
        category: ConceptCategory::Hardware,
        definition: "Trigger code execution immediately on pin state change (Rising/Falling edge).",
        key_points: &[
            "IRAM_ATTR: Stores ISR in RAM for speed.",
            "Keep it Short: Set a flag and exit. No Serial prints or delays inside.",
            "Debounce: Mechanical switches generate multiple triggers; software debounce needed.",
        ],
        pitfalls: &[],
        code_snippet: Some(
            "volatile bool pressed = false;\nvoid IRAM_ATTR isr() {\n  pressed = true;\n}\nvoid setup() {\n  pinMode(0, INPUT_PULLUP);\n  attachInterrupt(0, isr, FALLING);\n}",
        ),
    },
    Concept {
        id: "deep_sleep",
        title: "Deep Sleep",
        category: ConceptCategory::Power,
        definition: "Lowest power mode. CPU/RAM off. Only RTC active. Wakes via Reset.",
        key_points: &[
            "Power: ~10uA current.",
            "Memory: SRAM lost. Use `RTC_DATA_ATTR` variables to save state.",
            "Wakeup: Timer, Touch, Ext0 (RTC GPIO), Ext1.",
        ],
        pitfalls: &[],
        code_snippet: Some(
            "RTC_DATA_ATTR int bootCount = 0;\nvoid setup() {\n  bootCount++;\n  // Sleep for 5s\n  esp_sleep_enable_timer_wakeup(5 * 1000000);\n  esp_deep_sleep_start();\n}",
        ),
    },
];

/// The built-in concept catalog, in display order
pub fn concepts() -> &'static [Concept] {
    &CONCEPTS
}
