//! wadtext - render text as Doom wall geometry
//!
//! Reads a texture atlas, a directory of glyph images and a word list,
//! and writes a PWAD with one room per level whose west wall spells the
//! level's lines of text.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use wadtext::config::Config;
use wadtext::map::write_wad;
use wadtext::pipeline::{build_maps, wall_layout, Assets};
use wadtext::words::read_word_list;

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    help: bool,
    version: bool,
    config: Option<PathBuf>,
    atlas: Option<PathBuf>,
    glyphs: Option<PathBuf>,
    words: Option<PathBuf>,
    output: Option<PathBuf>,
    /// Lines of a single level given on the command line
    text: Vec<String>,
    dump_ranges: bool,
    init_config: bool,
    force: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            // --key=value or --key value
            let (key, inline) = match arg.split_once('=') {
                Some((k, v)) if k.starts_with("--") => (k.to_string(), Some(v.to_string())),
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String> {
                inline
                    .clone()
                    .or_else(|| iter.next())
                    .ok_or_else(|| anyhow!("{} requires a value", name))
            };

            match key.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-V" | "--version" => parsed.version = true,
                "-c" | "--config" => parsed.config = Some(value(&key)?.into()),
                "--atlas" => parsed.atlas = Some(value(&key)?.into()),
                "--glyphs" => parsed.glyphs = Some(value(&key)?.into()),
                "--words" => parsed.words = Some(value(&key)?.into()),
                "-o" | "--output" => parsed.output = Some(value(&key)?.into()),
                "--text" => parsed.text.push(value(&key)?),
                "--dump-ranges" => parsed.dump_ranges = true,
                "--init-config" => parsed.init_config = true,
                "-f" | "--force" => parsed.force = true,
                other => bail!("Unknown argument: {} (see --help)", other),
            }
        }

        Ok(parsed)
    }
}

/// Print help message
fn print_help() {
    println!(
        r#"wadtext {} - render text as Doom wall geometry

USAGE:
    wadtext [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    -c, --config PATH       Config file (default: search, see below)
    --atlas PATH            Reference atlas image (PNG or GIF)
    --glyphs DIR            Directory of glyph images (<char>.png,
                            long_space.png, short_space.png)
    --words PATH            Word list (blank line between levels)
    -o, --output PATH       PWAD to write
    --text LINE             Render LINE instead of the word list
                            (repeat for more lines; one level)
    --dump-ranges           Print the compiled glyph ranges and exit
    --init-config           Write the default config file
    -f, --force             Overwrite config file without confirmation

CONFIG FILE (first found):
    $WADTEXT_CONFIG
    ~/.config/wadtext/config.toml
    /etc/wadtext/config.toml

EXAMPLES:
    wadtext --init-config
    wadtext --atlas cyl1_1.gif --glyphs letters --words words.txt -o text.wad
    wadtext --text "hello" --text "world" -o hello.wad
    RUST_LOG=debug wadtext --dump-ranges
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Write the default config, asking before overwriting
fn init_config(args: &Args) -> Result<()> {
    let path = match &args.config {
        Some(p) => p.clone(),
        None => Config::user_config_path().ok_or_else(|| anyhow!("Config directory not found"))?,
    };

    if path.exists() && !args.force {
        println!("Config file already exists: {}", path.display());
        print!("Overwrite? [y/N]: ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input != "y" && input != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::write_default(&path)?;
    println!("Config file generated: {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse(std::env::args().skip(1))?;
    debug!("{:?}", args);

    if args.help {
        print_help();
        return Ok(());
    }

    if args.version {
        println!("wadtext {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.init_config {
        return init_config(&args);
    }

    // Explicit config must load; discovered config falls back to defaults
    let mut cfg = match &args.config {
        Some(path) => {
            let cfg = Config::load_from_file(path)?;
            info!("Loaded config: {}", path.display());
            cfg
        }
        None => Config::load(),
    };

    // Command line overrides
    if let Some(p) = &args.atlas {
        cfg.input.atlas = p.to_string_lossy().into_owned();
    }
    if let Some(p) = &args.glyphs {
        cfg.input.glyphs = p.to_string_lossy().into_owned();
    }
    if let Some(p) = &args.words {
        cfg.input.words = p.to_string_lossy().into_owned();
    }
    if let Some(p) = &args.output {
        cfg.output.path = p.to_string_lossy().into_owned();
    }
    cfg.validate().context("Invalid configuration")?;

    let assets = Assets::load(Path::new(&cfg.input.atlas), Path::new(&cfg.input.glyphs))?;

    if args.dump_ranges {
        print!("{}", assets.glyphs);
        return Ok(());
    }

    let levels = if args.text.is_empty() {
        read_word_list(Path::new(&cfg.input.words))?
    } else {
        vec![args.text.clone()]
    };
    if levels.is_empty() {
        bail!("No text to render (word list is empty)");
    }

    let layout = wall_layout(&cfg, &assets);
    let maps = build_maps(&levels, &assets.glyphs, &layout, cfg.output.naming)?;
    write_wad(Path::new(&cfg.output.path), &maps)?;

    eprintln!("[OK] {} maps written to {}", maps.len(), cfg.output.path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_values() {
        let args = parse(&["--atlas", "a.gif", "--glyphs=letters", "-o", "out.wad"]).unwrap();
        assert_eq!(args.atlas, Some(PathBuf::from("a.gif")));
        assert_eq!(args.glyphs, Some(PathBuf::from("letters")));
        assert_eq!(args.output, Some(PathBuf::from("out.wad")));
    }

    #[test]
    fn test_parse_repeated_text() {
        let args = parse(&["--text", "hello world", "--text=a=b"]).unwrap();
        assert_eq!(args.text, vec!["hello world", "a=b"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--atlas"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let args = parse(&["--dump-ranges", "-f", "--init-config"]).unwrap();
        assert!(args.dump_ranges && args.force && args.init_config);
        assert!(!args.help);
    }
}
