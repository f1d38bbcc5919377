//! patdot CLI - render PATRICIA trie snapshots as Graphviz DOT
//!
//! The trie's owner dumps its arena as a JSON snapshot; patdot validates
//! the snapshot and writes the graph description to stdout or a file.

use anyhow::bail;
use clap::{Parser, Subcommand};
use patricia_dot::{DotCreator, Trie};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patdot")]
#[command(about = "Render PATRICIA trie snapshots as Graphviz DOT")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a trie snapshot as a DOT document
    Render {
        /// Path to the JSON trie snapshot
        input: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering resolution hint
        #[arg(long, default_value_t = patricia_dot::DEFAULT_DPI)]
        dpi: u32,

        /// Group nodes into symbol clusters
        #[arg(long)]
        cluster: bool,

        /// Render the subtree behind "node,slot" instead of the whole trie
        #[arg(long, value_parser = parse_subtree)]
        subtree: Option<(usize, u8)>,
    },

    /// Print summary information about a snapshot
    Info {
        /// Path to the JSON trie snapshot
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            dpi,
            cluster,
            subtree,
        } => {
            let trie = load_trie(&input)?;
            let (node, slot) = subtree.unwrap_or((trie.root(), 0));
            if node >= trie.len() {
                bail!("no such vertex: {node},{slot}");
            }
            match output {
                Some(path) => render(File::create(path)?, &trie, node, slot, dpi, cluster)?,
                None => render(io::stdout().lock(), &trie, node, slot, dpi, cluster)?,
            }
        }

        Commands::Info { input } => {
            let data = std::fs::read_to_string(&input)?;
            let trie = Trie::from_json(&data)?;
            let validation = trie.validate();
            println!(
                "{}",
                serde_json::json!({
                    "nodes": trie.len(),
                    "symbol_bits": trie.symbol_bits(),
                    "valid": validation.is_ok(),
                    "error": validation.err().map(|e| e.to_string()),
                })
            );
        }
    }

    Ok(())
}

fn load_trie(path: &Path) -> anyhow::Result<Trie> {
    let data = std::fs::read_to_string(path)?;
    let trie = Trie::from_json(&data)?;
    trie.validate()?;
    Ok(trie)
}

fn render<W: io::Write>(
    out: W,
    trie: &Trie,
    node: usize,
    slot: u8,
    dpi: u32,
    cluster: bool,
) -> patricia_dot::Result<()> {
    let mut dot = DotCreator::with_dpi(out, dpi)?;
    dot.create(trie.vertex(node, slot), cluster)?;
    dot.finish()?;
    Ok(())
}

fn parse_subtree(s: &str) -> Result<(usize, u8), String> {
    let (node, slot) = s
        .split_once(',')
        .ok_or_else(|| "expected node,slot".to_string())?;
    let node = node.trim().parse().map_err(|e| format!("bad node id: {e}"))?;
    let slot: u8 = slot.trim().parse().map_err(|e| format!("bad slot: {e}"))?;
    if slot > 1 {
        return Err("slot must be 0 or 1".to_string());
    }
    Ok((node, slot))
}
