//! Cluster the articles listed in a dataset file.
//!
//! ```text
//! cargo run --example cluster_abstracts -- data/turner.tsv --abstracts cache/
//! cargo run --example cluster_abstracts -- data/mixed.tsv --abstracts cache/ --evaluate
//! ```
//!
//! Each abstract is read from `<abstracts>/<pmid>.txt`. Without
//! `--evaluate` only the first column of the dataset is used; with it the
//! second column is taken as the expected label.

use std::path::PathBuf;

use clap::Parser;
use reciprocal::dataset::{self, DatasetDescriptor};
use reciprocal::display::{render_evaluation, render_predicted};
use reciprocal::metrics::Evaluation;
use reciprocal::{DirectorySource, TermClusterer};

/// Mutual-best-match clustering of PubMed abstracts
#[derive(Parser, Debug)]
#[command(name = "cluster_abstracts")]
#[command(version, about, long_about = None)]
struct Args {
    /// Dataset file: one article id per line, optionally followed by a label
    data_file: PathBuf,

    /// Directory holding one `<pmid>.txt` file per abstract
    #[arg(short, long, default_value = "abstracts")]
    abstracts: PathBuf,

    /// Compare the prediction against the labels in the dataset
    #[arg(short, long)]
    evaluate: bool,

    /// Column separator of the dataset file
    #[arg(short, long, default_value = dataset::TAB)]
    separator: String,

    /// Disable ANSI colors in evaluation output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let dataset = DatasetDescriptor::new(&args.data_file).with_separator(args.separator);
    let clusterer = TermClusterer::new(DirectorySource::new(&args.abstracts));

    if args.evaluate {
        let (predicted, expected) = clusterer.predict_clusters_and_evaluate(&dataset)?;
        println!("{}", render_evaluation(&predicted, &expected, !args.no_color));
        println!("{}", Evaluation::compare(&predicted, &expected));
    } else {
        let predicted = clusterer.predict_clusters(&dataset)?;
        println!("{}", render_predicted(&predicted));
    }

    Ok(())
}
