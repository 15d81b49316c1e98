use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use merkle_checkpoint::{codec, Codec, CodecConfig, CombinerKind, Tree, TreeBuilder};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "merkle-checkpoint",
    about = "Order-sensitive checksum trees over signature sequences"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Accept bytes after the final record when decoding.
    #[arg(long, global = true)]
    allow_trailing_bytes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a tree from a signatures file and write its encoded form.
    Build {
        /// Signatures file (one signature per line, blank lines ignored).
        signatures: PathBuf,
        /// Destination for the encoded tree.
        #[arg(short, long)]
        output: PathBuf,
        /// Combining function for internal nodes.
        #[arg(long, default_value_t = CombinerKind::Adler32)]
        combiner: CombinerKind,
    },
    /// Decode an encoded tree and print its summary.
    Inspect {
        /// Encoded tree file.
        tree: PathBuf,
        /// Also list every node in breadth-first order.
        #[arg(long)]
        nodes: bool,
    },
    /// Compare the root signatures of two encoded trees.
    Compare {
        /// Encoded tree produced upstream.
        expected: PathBuf,
        /// Encoded tree rebuilt downstream.
        actual: PathBuf,
    },
    /// Recompute every internal signature of an encoded tree.
    Verify {
        /// Encoded tree file.
        tree: PathBuf,
        /// Combining function the tree was built with.
        #[arg(long, default_value_t = CombinerKind::Adler32)]
        combiner: CombinerKind,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let codec = Codec::new(CodecConfig::default().with_trailing_bytes(cli.allow_trailing_bytes));

    match cli.command {
        Commands::Build {
            signatures,
            output,
            combiner,
        } => run_build(&signatures, &output, combiner)?,
        Commands::Inspect { tree, nodes } => run_inspect(&codec, &tree, nodes)?,
        Commands::Compare { expected, actual } => run_compare(&codec, &expected, &actual)?,
        Commands::Verify { tree, combiner } => run_verify(&codec, &tree, combiner)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_build(signatures_path: &Path, output_path: &Path, combiner: CombinerKind) -> Result<()> {
    let signatures = read_signatures(signatures_path)?;
    debug!(leaves = signatures.len(), %combiner, "building tree");

    let tree = TreeBuilder::with_kind(combiner)
        .build(&signatures)
        .with_context(|| format!("failed to build tree from {}", signatures_path.display()))?;
    let bytes = codec::encode(&tree);

    fs::write(output_path, &bytes)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    info!(
        path = %output_path.display(),
        bytes = bytes.len(),
        "wrote encoded tree"
    );

    print_summary(&tree);
    Ok(())
}

fn run_inspect(codec: &Codec, tree_path: &Path, list_nodes: bool) -> Result<()> {
    let tree = load_tree(codec, tree_path)?;
    print_summary(&tree);

    if list_nodes {
        for (position, (_, node)) in tree.breadth_first().enumerate() {
            println!("{}\t{}", position, node);
        }
    }
    Ok(())
}

fn run_compare(codec: &Codec, expected_path: &Path, actual_path: &Path) -> Result<()> {
    let expected = load_tree(codec, expected_path)?;
    let actual = load_tree(codec, actual_path)?;

    println!("expected\t{}", hex::encode(expected.root_signature()));
    println!("actual\t{}", hex::encode(actual.root_signature()));

    if !expected.same_root(&actual) {
        warn!(
            expected_leaves = expected.leaf_count(),
            actual_leaves = actual.leaf_count(),
            "root signatures differ"
        );
        bail!("root mismatch: signature sequences differ in content or order");
    }

    println!("roots match");
    Ok(())
}

fn run_verify(codec: &Codec, tree_path: &Path, combiner: CombinerKind) -> Result<()> {
    let tree = load_tree(codec, tree_path)?;
    tree.verify(combiner.instantiate().as_ref())
        .with_context(|| format!("{} failed {} verification", tree_path.display(), combiner))?;

    println!("ok\t{} nodes consistent under {}", tree.node_count(), combiner);
    Ok(())
}

fn load_tree(codec: &Codec, path: &Path) -> Result<Tree> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        allow_trailing_bytes = codec.config().allow_trailing_bytes,
        "decoding tree"
    );
    codec
        .decode(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))
}

fn read_signatures(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
    );

    let mut signatures = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", line_no + 1))?;
        let sig = line.trim();
        if sig.is_empty() {
            continue;
        }
        signatures.push(sig.to_string());
    }
    Ok(signatures)
}

fn print_summary(tree: &Tree) {
    println!("root\t{}", hex::encode(tree.root_signature()));
    println!("leaves\t{}", tree.leaf_count());
    println!("nodes\t{}", tree.node_count());
    println!("height\t{}", tree.height());
    println!("encoded\t{} bytes", codec::encoded_len(tree));
}
