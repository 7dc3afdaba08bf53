//! Build script for ntcsense-core
//!
//! - Validates thermistor.toml at compile time
//! - Generates the default constant set into OUT_DIR/thermistor.rs

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Config path override
const CONFIG_ENV: &str = "NTCSENSE_THERMISTOR";

/// Default config file, relative to the crate root
const DEFAULT_CONFIG: &str = "thermistor.toml";

/// Widest ADC supported by the generated code
const MAX_RESOLUTION_BITS: i64 = 24;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={}", CONFIG_ENV);

    let config_path = match env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(DEFAULT_CONFIG),
    };
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config = load_config(&config_path);
    let set = validate_config(&config);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("thermistor.rs"), generate(&set))
        .expect("failed to write generated thermistor constants");
}

/// Validated constant set, ready for code generation
struct ConstantSet {
    name: String,
    part_number: String,
    manufacturer: String,
    nominal_ohms: f64,
    b_constant: Option<f64>,
    vref_volts: f64,
    adc_resolution_bits: i64,
    series_ohms: f64,
    parallel_ohms: Option<f64>,
    coefficients: [f64; 3],
    min_ohms: f64,
    max_ohms: f64,
    lower_celsius: f64,
    upper_celsius: f64,
}

/// Read and parse the TOML file, failing the build with a readable box
fn load_config(path: &PathBuf) -> toml::Value {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(
            "Failed to read thermistor constant set",
            &[
                format!("Path: {}", path.display()),
                format!("Error: {}", e),
                format!("Set {} to point at another file", CONFIG_ENV),
            ],
        ),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in thermistor constant set",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    }
}

/// Check every section and collect all problems before failing
fn validate_config(config: &toml::Value) -> ConstantSet {
    let mut errors = Vec::new();

    for section in ["thermistor", "circuit", "steinhart_hart", "clamp"] {
        if config.get(section).and_then(|s| s.as_table()).is_none() {
            errors.push(format!("Missing [{}] section", section));
        }
    }
    if !errors.is_empty() {
        fail("Missing required sections", &errors);
    }

    let name = string(config, "thermistor", "name", &mut errors);
    let part_number = optional_string(config, "thermistor", "part_number");
    let manufacturer = optional_string(config, "thermistor", "manufacturer");
    let nominal_ohms = number(config, "thermistor", "nominal_ohms", &mut errors);
    let b_constant = optional_number(config, "thermistor", "b_constant", &mut errors);

    let vref_volts = number(config, "circuit", "vref_volts", &mut errors);
    let adc_resolution_bits = integer(config, "circuit", "adc_resolution_bits", &mut errors);
    let series_ohms = number(config, "circuit", "series_ohms", &mut errors);
    let parallel_ohms = optional_number(config, "circuit", "parallel_ohms", &mut errors);

    let a = number(config, "steinhart_hart", "a", &mut errors);
    let b = number(config, "steinhart_hart", "b", &mut errors);
    let c = number(config, "steinhart_hart", "c", &mut errors);

    let min_ohms = number(config, "clamp", "min_ohms", &mut errors);
    let max_ohms = number(config, "clamp", "max_ohms", &mut errors);

    let lower_celsius =
        optional_number(config, "limits", "lower_celsius", &mut errors).unwrap_or(-40.0);
    let upper_celsius =
        optional_number(config, "limits", "upper_celsius", &mut errors).unwrap_or(125.0);

    if name.is_empty() {
        errors.push("[thermistor] name cannot be empty".to_string());
    }
    if nominal_ohms <= 0.0 {
        errors.push("[thermistor] nominal_ohms must be positive".to_string());
    }
    if vref_volts <= 0.0 {
        errors.push("[circuit] vref_volts must be positive".to_string());
    }
    if !(1..=MAX_RESOLUTION_BITS).contains(&adc_resolution_bits) {
        errors.push(format!(
            "[circuit] adc_resolution_bits must be 1-{}",
            MAX_RESOLUTION_BITS
        ));
    }
    if series_ohms <= 0.0 {
        errors.push("[circuit] series_ohms must be positive".to_string());
    }
    if let Some(ohms) = parallel_ohms {
        if ohms <= 0.0 {
            errors.push("[circuit] parallel_ohms must be positive (omit to disable)".to_string());
        }
    }
    if min_ohms <= 0.0 {
        errors.push("[clamp] min_ohms must be positive".to_string());
    }
    if min_ohms >= max_ohms {
        errors.push("[clamp] min_ohms must be below max_ohms".to_string());
    }
    if lower_celsius >= upper_celsius {
        errors.push("[limits] lower_celsius must be below upper_celsius".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid thermistor constant set", &errors);
    }

    if b <= 0.0 || c < 0.0 {
        println!(
            "cargo:warning=thermistor.toml: B/C coefficients do not describe an NTC curve"
        );
    }

    ConstantSet {
        name,
        part_number,
        manufacturer,
        nominal_ohms,
        b_constant,
        vref_volts,
        adc_resolution_bits,
        series_ohms,
        parallel_ohms,
        coefficients: [a, b, c],
        min_ohms,
        max_ohms,
        lower_celsius,
        upper_celsius,
    }
}

fn field<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn string(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> String {
    match field(config, section, key) {
        Some(toml::Value::String(s)) => s.clone(),
        Some(_) => {
            errors.push(format!("[{}] {} must be a string", section, key));
            String::new()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            String::new()
        }
    }
}

fn optional_string(config: &toml::Value, section: &str, key: &str) -> String {
    field(config, section, key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn optional_number(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<f64> {
    let value = match field(config, section, key) {
        Some(toml::Value::Float(f)) => *f,
        Some(toml::Value::Integer(i)) => *i as f64,
        Some(_) => {
            errors.push(format!("[{}] {} must be a number", section, key));
            return None;
        }
        None => return None,
    };

    if !value.is_finite() {
        errors.push(format!("[{}] {} must be finite", section, key));
        return None;
    }
    Some(value)
}

fn number(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> f64 {
    if field(config, section, key).is_none() {
        errors.push(format!("[{}] missing '{}'", section, key));
        return 0.0;
    }
    optional_number(config, section, key, errors).unwrap_or(0.0)
}

fn integer(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> i64 {
    match field(config, section, key) {
        Some(toml::Value::Integer(i)) => *i,
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            0
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            0
        }
    }
}

/// Emit the Rust source for the generated module
fn generate(set: &ConstantSet) -> String {
    let mut out = String::new();
    let [a, b, c] = set.coefficients;

    // Writing into a String cannot fail
    let _ = writeln!(out, "// @generated by ntcsense-core/build.rs. Do not edit.");
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Metadata of the thermistor the constant set was fitted for");
    let _ = writeln!(out, "pub const INFO: SensorInfo = SensorInfo {{");
    let _ = writeln!(out, "    name: {:?},", set.name);
    let _ = writeln!(out, "    part_number: {:?},", set.part_number);
    let _ = writeln!(out, "    manufacturer: {:?},", set.manufacturer);
    let _ = writeln!(out, "    nominal_ohms: {:?},", set.nominal_ohms);
    match set.b_constant {
        Some(beta) => {
            let _ = writeln!(out, "    b_constant: Some({:?}),", beta);
        }
        None => {
            let _ = writeln!(out, "    b_constant: None,");
        }
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Temperature window the coefficients were fitted over");
    let _ = writeln!(
        out,
        "pub const RATED_RANGE: TemperatureRange = TemperatureRange::new({:?}, {:?});",
        set.lower_celsius, set.upper_celsius
    );
    let _ = writeln!(out);

    let divider = if set.parallel_ohms.is_some() {
        "WithParallel"
    } else {
        "SeriesOnly"
    };
    let _ = writeln!(out, "/// Divider strategy selected by the constant set");
    let _ = writeln!(out, "pub type SensorDivider = {};", divider);
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Circuit and model constants");
    let _ = writeln!(out, "pub const SENSOR: ThermistorConfig<SensorDivider> = ThermistorConfig::new(");
    let _ = writeln!(out, "    AdcResolution::new({}),", set.adc_resolution_bits);
    let _ = writeln!(out, "    {:?},", set.vref_volts);
    let _ = writeln!(out, "    {:?},", set.series_ohms);
    let _ = writeln!(out, "    SteinhartHart::new({:?}, {:?}, {:?}),", a, b, c);
    let _ = writeln!(out, "    ResistanceClamp::new({:?}, {:?}),", set.min_ohms, set.max_ohms);
    match set.parallel_ohms {
        Some(ohms) => {
            let _ = writeln!(out, ")");
            let _ = writeln!(out, ".with_parallel({:?});", ohms);
        }
        None => {
            let _ = writeln!(out, ");");
        }
    }

    out
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.chars().count() > 62 {
                    format!("{}...", line.chars().take(59).collect::<String>())
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
