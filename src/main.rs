//! foldlog - demo document writer

use clap::Parser;
use foldlog::http::{hooks, HttpRequest};
use foldlog::render::{Describe, Describer};
use foldlog::{marker, Document, SinkTarget, Theme};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

/// Write a demonstration foldlog document
#[derive(Parser, Debug)]
#[command(name = "foldlog")]
#[command(version)]
#[command(about = "Write a demonstration HTML log document with collapsible sections")]
pub struct Args {
    /// Path of the HTML document to write
    #[arg(long, default_value = "foldlog-demo.html")]
    pub html: PathBuf,

    /// Echo the plain-text stream to this file instead of stdout
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Stylesheet: classic, dark-flat or dark-gradient
    #[arg(long)]
    pub theme: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave out the date and time columns
    #[arg(long)]
    pub no_timestamps: bool,

    /// Leave out the marker column
    #[arg(long)]
    pub no_emojis: bool,

    /// Also fetch this URL and show the HTTP transaction
    #[arg(long)]
    pub fetch: Option<String>,
}

struct Shipment {
    id: u32,
    destination: String,
    parcels: Vec<Parcel>,
    note: Option<String>,
}

struct Parcel {
    label: String,
    weight_grams: u32,
}

impl Describe for Parcel {
    fn describe(&self, out: &mut Describer<'_>) {
        out.record("Parcel")
            .field("label", &self.label)
            .field("weight_grams", &self.weight_grams)
            .finish();
    }
}

impl Describe for Shipment {
    fn describe(&self, out: &mut Describer<'_>) {
        out.record("Shipment")
            .field("id", &self.id)
            .field("destination", &self.destination)
            .field("parcels", &self.parcels)
            .field("note", &self.note)
            .finish();
    }
}

#[derive(Serialize)]
struct Manifest<'a> {
    carrier: &'a str,
    shipments: Vec<u32>,
    insured: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("could not book carrier")]
struct BookingError(#[source] std::io::Error);

fn demo_shipment() -> Shipment {
    Shipment {
        id: 42,
        destination: "Lisbon".to_string(),
        parcels: (1..=12)
            .map(|i| Parcel {
                label: format!("box-{i}"),
                weight_grams: 250 * i,
            })
            .collect(),
        note: None,
    }
}

/// Where every document of the demo echoes its plain-text lines.
enum TextOutput {
    Console,
    /// One file shared by the top-level document and the embedded ones.
    File(File),
    Discard,
}

impl TextOutput {
    fn target(&self) -> std::io::Result<SinkTarget> {
        match self {
            TextOutput::Console => Ok(SinkTarget::Console),
            TextOutput::File(file) => Ok(SinkTarget::Writer(Box::new(file.try_clone()?))),
            TextOutput::Discard => Ok(SinkTarget::None),
        }
    }
}

fn sub_document(
    title: &str,
    parent: &Document,
    text: &TextOutput,
) -> Result<Document, Box<dyn std::error::Error>> {
    Ok(Document::builder(title)
        .text_target(text.target()?)
        .config(*parent.config())
        .build()?)
}

fn write_demo(
    doc: &mut Document,
    text: &TextOutput,
    fetch: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    doc.info_with(marker::SETUP, "Preparing shipment batch")?;
    doc.show(&demo_shipment(), "shipment")?;
    doc.show_as_structured(
        &Manifest {
            carrier: "Gull Freight",
            shipments: vec![42, 43],
            insured: true,
        },
        "manifest",
    )?;
    doc.debug("Carrier API is in sandbox mode")?;

    let failure = BookingError(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "carrier did not answer",
    ));
    doc.show_error(&failure, "booking")?;

    let mut outer = sub_document("Customs paperwork", doc, text)?;
    outer.info_with(marker::PASSING_TEST, "Declaration filed")?;
    let mut inner = sub_document("Inspection", doc, text)?;
    inner.info_with(marker::SUBJECTIVE_TEST, "Random inspection requested")?;
    outer.embed(&mut inner)?;
    doc.embed(&mut outer)?;

    if let Some(url) = fetch {
        let client = reqwest::blocking::Client::new();
        let request = HttpRequest::new(reqwest::Method::GET, url)?;
        match doc.show_http_transaction(&client, &request, Some(&hooks::pretty_json)) {
            Ok(response) => info!(status = %response.status(), "Fetched demo URL"),
            Err(err) => doc.info_with(marker::INCONCLUSIVE_TEST, &format!("Fetch skipped: {err}"))?,
        }
    }

    doc.info_with(marker::CLEANUP, "Batch complete")?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = foldlog::config::load_config_with_precedence(args.config.clone())?;
        let merged = foldlog::config::merge_config(config_file);
        let with_env = foldlog::config::apply_env_overrides(merged);

        // Flags only override when given
        let timestamps_override = args.no_timestamps.then_some(false);
        let emojis_override = args.no_emojis.then_some(false);

        foldlog::config::apply_cli_overrides(
            with_env,
            args.theme.clone(),
            timestamps_override,
            emojis_override,
        )
    };

    foldlog::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let theme: Theme = config.theme.parse()?;
    let text = match &args.text {
        Some(path) => TextOutput::File(File::create(path)?),
        None => TextOutput::Console,
    };

    let mut doc = Document::builder("foldlog demo")
        .html_file(&args.html)
        .text_target(text.target()?)
        .theme(theme)
        .config(config.document)
        .build()?;

    let result = write_demo(&mut doc, &text, args.fetch.as_deref());
    doc.conclude();
    result?;

    info!(html = %args.html.display(), "Demo document written");
    Ok(())
}
