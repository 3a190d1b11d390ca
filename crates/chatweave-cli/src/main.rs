mod extract;
mod render;
mod vtt;

use anyhow::{Context, Result};
use chatweave_config::Config;
use chatweave_engine::{ChatItem, Settings, compile_block};
use std::{env, fs, process};

enum Output {
    Text,
    Html,
    Json,
}

struct Args {
    path: String,
    output: Output,
    compact: Option<bool>,
}

fn parse_args() -> Option<Args> {
    let mut output = Output::Text;
    let mut compact = None;
    let mut path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--html" => output = Output::Html,
            "--json" => output = Output::Json,
            "--compact" => compact = Some(true),
            _ if arg.starts_with('-') => return None,
            _ if path.is_none() => path = Some(arg),
            _ => return None,
        }
    }

    Some(Args {
        path: path?,
        output,
        compact,
    })
}

fn main() -> Result<()> {
    let Some(args) = parse_args() else {
        eprintln!("Usage: chatweave [--html|--json] [--compact] <document.md>");
        process::exit(1);
    };

    // Config file supplies defaults; flags override
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: ignoring config file: {e}");
            Config::default()
        }
    };
    let settings = Settings {
        reverse_arrows: config.reverse_arrows,
    };
    let compact = args.compact.unwrap_or(config.compact);

    let document = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path))?;

    let fences = extract::extract_chat_fences(&document);
    if fences.is_empty() {
        eprintln!("No chat blocks found in {}", args.path);
        return Ok(());
    }

    let tokenizer = vtt::VttTokenizer;
    let mut blocks: Vec<Vec<ChatItem>> = Vec::new();
    for (index, fence) in fences.iter().enumerate() {
        let items = compile_block(&fence.source, fence.dialect, &settings, &tokenizer)
            .with_context(|| format!("failed to compile chat block {}", index + 1))?;
        blocks.push(items);
    }

    match args.output {
        Output::Text => {
            for (index, items) in blocks.iter().enumerate() {
                if index > 0 {
                    println!();
                    println!("{}", "─".repeat(72));
                    println!();
                }
                for line in render::text::render_block(items) {
                    println!("{line}");
                }
            }
        }
        Output::Html => print!("{}", render::html::render_document(&blocks, compact)),
        Output::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
    }

    Ok(())
}
