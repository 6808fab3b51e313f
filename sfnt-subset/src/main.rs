//! binary subset tool
//!
//! Takes a font file and a subset input which describes the desired subset, and output is a new
//! font file containing only the data specified in the input.
//!

use clap::Parser;
use sfnt_engine::{load_font, FontOptions};
use sfnt_subset::{parse_tag_list, parse_unicodes, populate_gids, SubsetError, Subsetter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The input font file.
    #[arg(short, long)]
    path: std::path::PathBuf,

    /// The index of the font, if the input is a collection
    #[arg(long, default_value_t = 0)]
    index: u32,

    /// List of glyph ids
    #[arg(short, long)]
    gids: Option<String>,

    /// List of unicode codepoints
    #[arg(short, long)]
    unicodes: Option<String>,

    /// Prefix for the PostScript name, e.g. "ABCDEF+"
    #[arg(long)]
    prefix: Option<String>,

    /// Tables to keep besides the required ones; all tables are kept if unset
    #[arg(short, long)]
    keep_tables: Option<String>,

    /// GSUB features applied when mapping unicodes, e.g. "vrt2,vert"
    #[arg(long)]
    gsub_features: Option<String>,

    /// The output font file
    #[arg(short, long)]
    output_file: std::path::PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SubsetError> {
    let gids = populate_gids(args.gids.as_deref().unwrap_or_default())?;
    let unicodes = parse_unicodes(args.unicodes.as_deref().unwrap_or_default())?;
    let keep_tables = args
        .keep_tables
        .as_deref()
        .map(parse_tag_list)
        .transpose()?;

    let gsub_features = args
        .gsub_features
        .as_deref()
        .map(parse_tag_list)
        .transpose()?
        .unwrap_or_default();

    let font_bytes = std::fs::read(&args.path)?;
    let mut font = load_font(&font_bytes, args.index, FontOptions::default())?;
    for feature in gsub_features {
        font.enable_gsub_feature(feature);
    }
    let mut subsetter = match keep_tables {
        Some(tables) => Subsetter::with_keep_tables(&font, tables)?,
        None => Subsetter::new(&font)?,
    };
    subsetter.add_all(unicodes);
    subsetter.add_glyph_ids(gids);
    if let Some(prefix) = &args.prefix {
        subsetter.set_prefix(prefix.as_str());
    }
    let output = std::fs::File::create(&args.output_file)?;
    subsetter.write_to(std::io::BufWriter::new(output))
}
