use std::path::PathBuf;

use clap::Parser;

/// Pluggable numeric conversion used by the scanners.
///
/// Both functions receive one token with separators already stripped and must
/// not fail: text that is not a number converts to zero.
#[derive(Debug, Clone, Copy)]
pub struct NumberParser {
    pub parse_float: fn(&str) -> f32,
    pub parse_int: fn(&str) -> i32,
}

impl Default for NumberParser {
    fn default() -> Self {
        Self {
            parse_float: atof,
            parse_int: atoi,
        }
    }
}

/// Float conversion with C `atof` semantics.
///
/// Skips leading whitespace, accepts an optional sign, digits with an optional
/// fraction and an optional exponent, and ignores everything after the longest
/// numeric prefix. Returns 0.0 when there is no such prefix.
pub fn atof(s: &str) -> f32 {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[end + 1..]);
        mantissa_digits += frac_digits;
        end += 1 + frac_digits;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Integer conversion with C `atoi` semantics.
///
/// Out-of-range values convert to 0.
pub fn atoi(s: &str) -> i32 {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return 0;
    }
    s[..sign + digits].parse().unwrap_or(0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Fully resolved inspection configuration (constructed from CLI args).
#[derive(Debug, Clone, Default)]
pub struct InspectConfig {
    pub inputs: Vec<PathBuf>,
    pub build_mesh: bool,
    pub dump: bool,
    pub json: bool,
    pub verbose: bool,
    pub log_json: bool,
    pub threads: Option<usize>,
    pub numbers: NumberParser,
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "flatobj",
    about = "Wavefront OBJ to tightly packed, GPU-ready vertex buffers",
    version
)]
pub struct CliArgs {
    /// OBJ files to parse
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Assemble the interleaved vertex buffer for triangulated meshes
    #[arg(long)]
    pub mesh: bool,

    /// Print typed arrays and assembled vertices
    #[arg(long)]
    pub dump: bool,

    /// Emit reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write log events to stderr as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Worker thread count (default: all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl From<CliArgs> for InspectConfig {
    fn from(args: CliArgs) -> Self {
        InspectConfig {
            inputs: args.inputs,
            build_mesh: args.mesh,
            dump: args.dump,
            json: args.json,
            verbose: args.verbose,
            log_json: args.log_json,
            threads: args.threads,
            numbers: NumberParser::default(),
        }
    }
}
