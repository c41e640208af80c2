//! Built-in cheat sheet content

use super::models::{Item, Section};

/// The default section list, used on first run, after a reset, and whenever
/// the persisted snapshot cannot be read.
pub fn default_sections() -> Vec<Section> {
    vec![
        Section::new(
            "1. C/C++ & Bitwise Logic",
            vec![
                Item::new(
                    "Data Types",
                    "uint8_t (0-255), int8_t (-128 to 127)\nuint16_t (0-65535), uint32_t (0-4B)\nbool (true/false), float (4 bytes)",
                    "Use `stdint.h` types for precise control. `uint8_t` is standard for register manipulation. `volatile` keyword is required for variables modified inside an ISR.",
                ),
                Item::new(
                    "Bitwise Manipulation",
                    "Set bit N:   val |= (1 << N);\nClear bit N: val &= ~(1 << N);\nToggle bit N: val ^= (1 << N);\nCheck bit N: bool isSet = (val >> N) & 1;",
                    "Used for register config. `<<` shifts bits. `|` sets to 1. `&` with `~` sets to 0. `^` flips.",
                ),
                Item::new(
                    "Pointers & Memory",
                    "int x = 10; int *ptr = &x;\n*ptr = 20; // changes x to 20\nvoid func(int *p) { *p++; }",
                    "`&` gets address. `*` dereferences (access value). Pass pointers to functions to modify original variables or avoid copying large structs.",
                ),
            ],
        ),
        Section::new(
            "2. GPIO & Interrupts",
            vec![
                Item::new(
                    "GPIO Config",
                    "pinMode(pin, INPUT_PULLUP);\ndigitalWrite(pin, HIGH);\nint state = digitalRead(pin);",
                    "`INPUT_PULLUP` uses internal resistor, preventing floating signals. Essential for buttons connecting to GND.",
                ),
                Item::new(
                    "Interrupt Service Routine",
                    "volatile bool flag = false;\nvoid IRAM_ATTR isr() { flag = true; }\nattachInterrupt(digitalPinToInterrupt(pin), isr, FALLING);",
                    "`IRAM_ATTR` keeps ISR in fast RAM. ISRs must be short. No `Serial.print`, `delay`, or I2C inside ISR. Use flags to trigger main loop actions.",
                ),
                Item::new(
                    "Debouncing",
                    "if ((millis() - lastTime) > debounceDelay) {\n  // Valid button press action\n  lastTime = millis();\n}",
                    "Mechanical contacts bounce. Software debouncing ignores rapid state changes within a small window (e.g., 50-200ms).",
                ),
            ],
        ),
        Section::new(
            "3. Sensors & Protocols",
            vec![
                Item::new(
                    "I2C (2-Wire)",
                    "Wire.begin(SDA, SCL);\nWire.beginTransmission(0x68);\nWire.write(reg); Wire.endTransmission();\nWire.requestFrom(0x68, len);",
                    "Synchronous, addressable. Master drives Clock (SCL). Used for many sensors (BMP280, OLED). `requestFrom` reads bytes from slave.",
                ),
                Item::new(
                    "Ultrasonic (HC-SR04)",
                    "digitalWrite(trig, HIGH); delayMicroseconds(10);\ndigitalWrite(trig, LOW);\nlong duration = pulseIn(echo, HIGH);",
                    "Send 10us trigger pulse. `pulseIn` measures time for echo to return. Distance (cm) = duration * 0.034 / 2.",
                ),
                Item::new(
                    "Analog (ADC) & PWM",
                    "int val = analogRead(pin); // 0-4095 (12-bit)\nledcSetup(chan, 5000, 8);\nledcAttachPin(pin, chan);\nledcWrite(chan, duty); // 0-255",
                    "ADC reads voltage. ESP32 ADC is non-linear at edges. LEDC is hardware PWM for dimming LEDs or motor control.",
                ),
            ],
        ),
        Section::new(
            "4. FreeRTOS Multitasking",
            vec![
                Item::new(
                    "Task Creation",
                    "xTaskCreate(func, \"Name\", 2048, NULL, 1, NULL);\nvoid func(void *p) {\n  while(1) { ...; vTaskDelay(10); }\n}",
                    "Tasks are independent infinite loops. Stack size is in words. Priority 1 is lower than 2. Tasks MUST yield (delay) to prevent WDT reset.",
                ),
                Item::new(
                    "Queues",
                    "QueueHandle_t q = xQueueCreate(10, sizeof(int));\nxQueueSend(q, &val, portMAX_DELAY);\nxQueueReceive(q, &buff, portMAX_DELAY);",
                    "Thread-safe data passing. `Send` copies data into queue. `Receive` blocks if empty. Decouples producers (sensors) from consumers (WiFi).",
                ),
                Item::new(
                    "Semaphores (Binary)",
                    "sem = xSemaphoreCreateBinary();\nxSemaphoreGive(sem); // Unlock/Signal\nxSemaphoreTake(sem, portMAX_DELAY); // Lock/Wait",
                    "Synchronization signal. Used to unblock a task from an ISR (`GiveFromISR`) or protect shared resources (Mutex).",
                ),
            ],
        ),
        Section::new(
            "5. Wi-Fi & Networking",
            vec![
                Item::new(
                    "Station Mode (STA)",
                    "WiFi.begin(ssid, pass);\nwhile(WiFi.status() != WL_CONNECTED) delay(100);\nSerial.println(WiFi.localIP());",
                    "Connects to an existing router. IP assigned via DHCP. Check `WiFi.status()` before making requests.",
                ),
                Item::new(
                    "Access Point (AP)",
                    "WiFi.softAP(\"ESP32-AP\", \"12345678\");\nIPAddress IP = WiFi.softAPIP();",
                    "ESP32 creates its own network. Clients connect to ESP32. Useful for configuration pages.",
                ),
                Item::new(
                    "HTTP Client (REST)",
                    "HTTPClient http; http.begin(url);\nint code = http.GET(); // or http.POST(json)\nif(code > 0) payload = http.getString();\nhttp.end();",
                    "Synchronous. Blocks until response or timeout. Use `WiFiClientSecure` for HTTPS. Check code 200 for success.",
                ),
            ],
        ),
        Section::new(
            "6. Async Web & MQTT",
            vec![
                Item::new(
                    "Async Web Server",
                    "server.on(\"/\", HTTP_GET, [](AsyncWebServerRequest *req){\n  req->send(200, \"text/plain\", \"Hi\");\n});\nserver.begin();",
                    "Non-blocking. Uses callbacks. Handles multiple clients concurrently. Ideal for serving dashboards alongside sensor tasks.",
                ),
                Item::new(
                    "MQTT (PubSub)",
                    "client.setServer(broker, 1883);\nclient.connect(\"ID\");\nclient.subscribe(\"topic/in\");\nclient.publish(\"topic/out\", \"msg\");",
                    "Lightweight, event-driven. Broker centralizes msgs. Good for unstable networks. Requires `client.loop()` in main loop.",
                ),
                Item::new(
                    "MQTT QoS",
                    "QoS 0: At most once\nQoS 1: At least once\nQoS 2: Exactly once",
                    "QoS 0 is fire-and-forget (fastest). QoS 1 ensures delivery (retry). QoS 2 ensures single delivery (slowest overhead).",
                ),
            ],
        ),
        Section::new(
            "7. Sleep Modes & Power",
            vec![
                Item::new(
                    "Deep Sleep",
                    "esp_sleep_enable_timer_wakeup(us);\nesp_deep_sleep_start();",
                    "Max power saving. CPU/RAM off. Only RTC works. Wakes up via reset (setup runs again). Variables in `RTC_DATA_ATTR` retained.",
                ),
                Item::new(
                    "Light Sleep",
                    "esp_light_sleep_start();",
                    "CPU paused, RAM retained. Resumes next line of code. Faster wake, higher current than deep sleep. Good for short idles.",
                ),
                Item::new(
                    "Wakeup Sources",
                    "esp_sleep_enable_ext0_wakeup(GPIO_NUM_33, 1);\nesp_sleep_get_wakeup_cause();",
                    "Wake from Deep/Light sleep via Timer, Touch, or EXT0/EXT1 (GPIO). EXT0 uses RTC IO.",
                ),
            ],
        ),
        Section::new(
            "8. Useful Utilities",
            vec![
                Item::new(
                    "Timing & Debug",
                    "unsigned long now = millis();\nSerial.printf(\"Val: %d\\n\", val);",
                    "`millis()` for non-blocking delays. `printf` for formatted output. Watchdog triggers if task starves > ~5s.",
                ),
                Item::new(
                    "JSON Handling",
                    "StaticJsonDocument<200> doc;\ndoc[\"sensor\"] = \"temp\";\ndoc[\"value\"] = 25.5;\nserializeJson(doc, Serial);",
                    "Use ArduinoJson library. Avoid manual string manipulation for JSON to prevent buffer overflows and syntax errors.",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let sections = default_sections();
        assert_eq!(sections.len(), 8);
        assert_eq!(sections[0].category, "1. C/C++ & Bitwise Logic");
        assert_eq!(sections[7].category, "8. Useful Utilities");
        assert_eq!(sections[7].items.len(), 2);
        assert!(sections[..7].iter().all(|s| s.items.len() == 3));
    }
}
