use arbor_tree::{Category, Identifiable, NodeId, NodeRef, NodeSpec, Tree, TreeError};
use arbor_view::view_tree_with;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "arbor", about = "Build a category tree and walk it.", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Tree as a JSON string, e.g. {"value":{"name":"root"},"children":[...]}.
    /// Defaults to a small sample tree.
    #[arg(long = "tree", value_name = "JSON", env = "ARBOR_TREE", global = true)]
    tree: Option<String>,

    /// Log level (e.g., trace, debug, info, warn, error). Default: info.
    #[arg(
        long = "log",
        value_name = "LEVEL",
        env = "ARBOR_LOG",
        default_value = "info",
        global = true
    )]
    log: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print node names in traversal order
    Traverse {
        #[arg(long, value_enum, default_value_t = Order::Breadth)]
        order: Order,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Render the tree
    Show,
    /// Find a node by name and print its path from the root
    Find {
        #[arg(long)]
        name: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Breadth,
    Depth,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("JSON tree parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("no node named {0:?}")]
    NotFound(String),
}

#[derive(Serialize, Debug)]
struct TraversalEntry<'a> {
    name: &'a str,
    id: Uuid,
    depth: usize,
}

fn main() {
    let cli = Cli::parse();
    install_tracing(&cli.log);
    debug!(cli = ?cli, "parsed cli");

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, AppError> {
    let spec = match cli.tree {
        None => {
            info!("no tree provided, using sample");
            sample_tree()
        }
        Some(json) => serde_json::from_str(&json)?,
    };

    let mut tree = Tree::new();
    let root = tree.append(spec);
    info!(nodes = tree.len(), "tree constructed");

    match cli.command {
        Command::Traverse { order, format } => traverse(&tree, root, order, format),
        Command::Show => {
            let view = view_tree_with(tree.node(root)?, &|category: &Category| {
                category.name().to_string()
            });
            Ok(view.to_string().trim_end().to_string())
        }
        Command::Find { name } => find(&tree, &name),
    }
}

fn sample_tree() -> NodeSpec<Category> {
    NodeSpec::new(
        Category::new("root"),
        vec![
            NodeSpec::new(
                Category::new("a"),
                vec![NodeSpec::leaf(Category::new("a1"))],
            ),
            NodeSpec::leaf(Category::new("b")),
        ],
    )
}

fn traverse(
    tree: &Tree<Category>,
    root: NodeId,
    order: Order,
    format: Format,
) -> Result<String, AppError> {
    let nodes: Vec<NodeRef<'_, Category>> = match order {
        Order::Breadth => tree.traverse(root)?.collect(),
        Order::Depth => tree.depth_first(root)?.collect(),
    };
    debug!(?order, count = nodes.len(), "traversed tree");

    match format {
        Format::Text => Ok(nodes
            .iter()
            .map(|node| node.value().name())
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => {
            let entries = nodes
                .iter()
                .map(|node| {
                    tree.depth(node.id()).map(|depth| TraversalEntry {
                        name: node.value().name(),
                        id: node.value().id(),
                        depth,
                    })
                })
                .collect::<Result<Vec<_>, TreeError>>()?;
            Ok(serde_json::to_string_pretty(&entries)?)
        }
    }
}

fn find(tree: &Tree<Category>, name: &str) -> Result<String, AppError> {
    let node = tree
        .find_by_name(name)
        .ok_or_else(|| AppError::NotFound(name.to_string()))?;

    let mut path: Vec<&str> = node
        .ancestors()
        .map(|ancestor| ancestor.value().name())
        .collect();
    path.reverse();
    path.push(node.value().name());

    Ok(format!("{}\npath: {}", node.value(), path.join(" / ")))
}

fn install_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}
