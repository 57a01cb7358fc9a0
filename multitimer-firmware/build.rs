//! Build script for multitimer-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates gadget.toml and compiles it into `gadget_config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    let config = load_config();
    let settings = validate_config(&config);
    write_config(&out_dir, &settings);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse gadget.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=gadget.toml");

    let config_path = Path::new("gadget.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: gadget.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a gadget.toml configuration file.         ║\n\
            ║  Please create one in the multitimer-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read gadget.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in gadget.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validated values from gadget.toml
struct Settings {
    capacity: i64,
    stale_after_s: i64,
    refresh_ms: i64,
    frame_us: i64,
    cycles: i64,
    address: i64,
    brightness: i64,
    splash_ms: i64,
    greeting_ms: i64,
    baudrate: i64,
}

/// Field lookup that collects every problem before failing
struct Checker<'a> {
    config: &'a toml::Value,
    errors: Vec<String>,
}

impl Checker<'_> {
    fn int(&mut self, section: &str, key: &str, range: std::ops::RangeInclusive<i64>) -> i64 {
        let Some(table) = self.config.get(section).and_then(|s| s.as_table()) else {
            let missing = format!("Missing [{}] section", section);
            if !self.errors.contains(&missing) {
                self.errors.push(missing);
            }
            return *range.start();
        };

        match table.get(key) {
            Some(toml::Value::Integer(value)) if range.contains(value) => *value,
            Some(toml::Value::Integer(_)) => {
                self.errors.push(format!(
                    "[{}] {} must be {}-{}",
                    section,
                    key,
                    range.start(),
                    range.end()
                ));
                *range.start()
            }
            Some(_) => {
                self.errors
                    .push(format!("[{}] {} must be an integer", section, key));
                *range.start()
            }
            None => {
                self.errors.push(format!("[{}] missing '{}'", section, key));
                *range.start()
            }
        }
    }
}

/// Validate every section and field, panicking with all errors at once
fn validate_config(config: &toml::Value) -> Settings {
    let mut check = Checker {
        config,
        errors: Vec::new(),
    };

    let settings = Settings {
        capacity: check.int("timers", "capacity", 1..=32),
        stale_after_s: check.int("timers", "stale_after_s", 1..=3_600),
        refresh_ms: check.int("countdown", "refresh_ms", 50..=1_000),
        frame_us: check.int("flourish", "frame_us", 1_000..=1_000_000),
        cycles: check.int("flourish", "cycles", 1..=16),
        address: check.int("display", "address", 0x70..=0x77),
        brightness: check.int("display", "brightness", 0..=15),
        splash_ms: check.int("display", "splash_ms", 0..=10_000),
        greeting_ms: check.int("display", "greeting_ms", 0..=10_000),
        baudrate: check.int("bridge", "baudrate", 9_600..=1_000_000),
    };

    let errors = check.errors;
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in gadget.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=gadget.toml validated successfully");
    settings
}

/// Emit the validated settings as Rust constants
fn write_config(out_dir: &Path, s: &Settings) {
    let generated = format!(
        "/// Concurrent timers tracked by the gadget\n\
         pub const TIMER_CAPACITY: usize = {capacity};\n\
         \n\
         /// Countdown loop timings\n\
         pub const GADGET_CONFIG: GadgetConfig = GadgetConfig {{\n\
         \x20   refresh_ms: {refresh_ms},\n\
         \x20   flourish_frame_us: {frame_us},\n\
         \x20   flourish_cycles: {cycles},\n\
         \x20   stale_after_s: {stale_after_s},\n\
         \x20   greeting_ms: {greeting_ms},\n\
         \x20   splash_ms: {splash_ms},\n\
         }};\n\
         \n\
         /// HT16K33 bus settings\n\
         pub const DISPLAY_CONFIG: Ht16k33Config = Ht16k33Config {{\n\
         \x20   address: {address:#04x},\n\
         \x20   brightness: {brightness},\n\
         }};\n\
         \n\
         /// Bridge UART baud rate\n\
         pub const BRIDGE_BAUDRATE: u32 = {baudrate};\n",
        capacity = s.capacity,
        refresh_ms = s.refresh_ms,
        frame_us = s.frame_us,
        cycles = s.cycles,
        stale_after_s = s.stale_after_s,
        greeting_ms = s.greeting_ms,
        splash_ms = s.splash_ms,
        address = s.address,
        brightness = s.brightness,
        baudrate = s.baudrate,
    );

    let mut f = File::create(out_dir.join("gadget_config.rs")).unwrap();
    f.write_all(generated.as_bytes()).unwrap();
}
