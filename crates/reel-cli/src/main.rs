//! reel CLI — inspect video format negotiation.
//!
//! Commands:
//!   reel caps                          Show the capability set in use
//!   reel formats                       List delivery formats and content types
//!   reel format <codec> [mime]         Negotiated format (--explain for why)
//!   reel type <codec> [mime]           Content type of the negotiated format
//!   reel url <hash> [codec] [mime]     Video URL in the negotiated format
//!   reel source <files.json> [hash]    Video source for a file list
//!   reel thumb <w> <h>                 Thumbnail size tag for a display area
//!   reel thumb-url <hash> <size>       Thumbnail URL
//!   reel codec <tag>                   Codec display names
//!
//! Options:
//!   --config <path|url>   Client config (default: $REEL_CONFIG, else built-in)
//!   --supports <f,f,...>  Probe as a runtime that plays these formats
//!   --all                 Probe as a runtime that plays every format
//!   --explain             With `format`, print which rule decided

use reel_core::effects::ListProbe;
use reel_core::models::media::{codec_label, codec_name};
use reel_core::{ClientConfig, Engine, Format, MediaFile};

struct Options {
    config: Option<String>,
    supports: Option<Vec<Format>>,
    explain: bool,
    args: Vec<String>,
}

fn main() {
    env_logger::init();

    let options = match parse_options(std::env::args().skip(1).collect()) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            std::process::exit(2);
        }
    };
    if options.args.is_empty() {
        print_usage();
        return;
    }

    let config = match &options.config {
        Some(location) => ClientConfig::open(location),
        None => ClientConfig::from_env(),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config: {}", e);
            std::process::exit(1);
        }
    };

    let engine = match &options.supports {
        Some(formats) => Engine::new(config, &ListProbe::formats(formats)),
        None => Engine::from_config(config),
    };
    log::debug!("reel: capabilities {:?}", engine.capabilities());

    let args = &options.args;
    let ok = match args[0].as_str() {
        "caps" => cmd_caps(&engine),
        "formats" => cmd_formats(&engine),
        "format" => cmd_format(&engine, &args[1..], options.explain),
        "type" => cmd_type(&engine, &args[1..]),
        "url" => cmd_url(&engine, &args[1..]),
        "source" => cmd_source(&engine, &args[1..]),
        "thumb" => cmd_thumb(&engine, &args[1..]),
        "thumb-url" => cmd_thumb_url(&engine, &args[1..]),
        "codec" => cmd_codec(&args[1..]),
        other => {
            eprintln!("unknown command: {}", other);
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_caps(engine: &Engine) -> bool {
    match serde_json::to_string_pretty(engine.capabilities()) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("caps: {}", e);
            false
        }
    }
}

fn cmd_formats(engine: &Engine) -> bool {
    let caps = engine.capabilities();
    for format in Format::ALL {
        let mark = if caps.supports(format) { "yes" } else { "no" };
        println!("{:<5} {:<4} {}", format, mark, format.content_type());
    }
    true
}

fn cmd_format(engine: &Engine, args: &[String], explain: bool) -> bool {
    if args.is_empty() {
        eprintln!("usage: reel format <codec> [mime]");
        return false;
    }
    let (codec, mime) = source_args(args);
    if explain {
        println!("{}", engine.explain(codec, mime));
    } else {
        println!("{}", engine.resolve_format(codec, mime));
    }
    true
}

fn cmd_type(engine: &Engine, args: &[String]) -> bool {
    if args.is_empty() {
        eprintln!("usage: reel type <codec> [mime]");
        return false;
    }
    let (codec, mime) = source_args(args);
    println!("{}", engine.content_type(codec, mime));
    true
}

fn cmd_url(engine: &Engine, args: &[String]) -> bool {
    if args.is_empty() {
        eprintln!("usage: reel url <hash> [codec] [mime]");
        return false;
    }
    let (codec, mime) = source_args(&args[1..]);
    let mut asset = reel_core::AssetRef::new(args[0].as_str());
    if !codec.is_empty() {
        asset = asset.with_codec(codec);
    }
    if !mime.is_empty() {
        asset = asset.with_mime(mime);
    }
    let url = engine.video_url(&asset);
    if url.is_empty() {
        eprintln!("no playable video for an empty hash");
        return false;
    }
    println!("{}", url);
    true
}

fn cmd_source(engine: &Engine, args: &[String]) -> bool {
    if args.is_empty() {
        eprintln!("usage: reel source <files.json> [fallback-hash]");
        return false;
    }
    let files: Vec<MediaFile> = match std::fs::read_to_string(&args[0])
        .map_err(|e| e.to_string())
        .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}: {}", args[0], e);
            return false;
        }
    };
    let fallback = args.get(1).map(String::as_str).unwrap_or("");
    let source = engine.video_source(&files, fallback);
    println!("{}", serde_json::to_string_pretty(&source).unwrap_or_default());
    true
}

fn cmd_thumb(engine: &Engine, args: &[String]) -> bool {
    let dims = (
        args.first().and_then(|s| s.parse::<u32>().ok()),
        args.get(1).and_then(|s| s.parse::<u32>().ok()),
    );
    match dims {
        (Some(w), Some(h)) => {
            println!("{}", engine.thumb_size(w, h));
            true
        }
        _ => {
            eprintln!("usage: reel thumb <width> <height>");
            false
        }
    }
}

fn cmd_thumb_url(engine: &Engine, args: &[String]) -> bool {
    if args.len() < 2 {
        eprintln!("usage: reel thumb-url <hash> <size>");
        return false;
    }
    println!("{}", engine.thumbnail_url(&args[0], "", &args[1]));
    true
}

fn cmd_codec(args: &[String]) -> bool {
    if args.is_empty() {
        eprintln!("usage: reel codec <tag>");
        return false;
    }
    println!("{}  {}", codec_label(&args[0]), codec_name(&args[0]));
    true
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_options(raw: Vec<String>) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        supports: None,
        explain: false,
        args: Vec::new(),
    };
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                options.config = Some(iter.next().ok_or("--config needs a value")?);
            }
            "--supports" => {
                let list = iter.next().ok_or("--supports needs a value")?;
                options.supports = Some(parse_formats(&list)?);
            }
            "--all" => options.supports = Some(Format::ALL.to_vec()),
            "--explain" => options.explain = true,
            _ => options.args.push(arg),
        }
    }
    Ok(options)
}

fn parse_formats(list: &str) -> Result<Vec<Format>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Format>().map_err(|e| e.to_string()))
        .collect()
}

/// `<codec> [mime]`, `-` standing for an empty codec.
fn source_args(args: &[String]) -> (&str, &str) {
    let codec = args.first().map(String::as_str).unwrap_or("");
    let codec = if codec == "-" { "" } else { codec };
    let mime = args.get(1).map(String::as_str).unwrap_or("");
    (codec, mime)
}

fn print_usage() {
    println!("reel - video format negotiation");
    println!();
    println!("usage: reel [--config <path|url>] [--supports <f,f,...> | --all] <command> [args]");
    println!();
    println!("commands:");
    println!("  caps                       Show the capability set in use");
    println!("  formats                    List delivery formats and content types");
    println!("  format <codec> [mime]      Negotiated format (--explain for why)");
    println!("  type <codec> [mime]        Content type of the negotiated format");
    println!("  url <hash> [codec] [mime]  Video URL in the negotiated format");
    println!("  source <files.json> [hash] Video source for a file list");
    println!("  thumb <w> <h>              Thumbnail size tag for a display area");
    println!("  thumb-url <hash> <size>    Thumbnail URL");
    println!("  codec <tag>                Codec display names");
    println!();
    println!("formats: avc hevc hev1 vvc ogg vp8 vp9 av1 webm");
    println!("use - for an empty codec, e.g. reel format - video/webm");
}
