//! Loading of the review table from a CSV or TSV file, possibly gzipped, that
//! is either stored locally or downloaded over HTTP

use crate::{
    progress::{ProgressConfig, ProgressReport, ProgressTracker, Work},
    record::Record,
    Result,
};
use anyhow::Context;
use async_compression::tokio::bufread::GzipDecoder;
use csv_async::AsyncReaderBuilder;
use futures::stream::StreamExt;
use reqwest::Response;
use std::io;
use tokio::io::{AsyncBufRead, AsyncRead};
use tokio_util::io::{ReaderStream, StreamReader};

/// Raw bytes of the review table
type Bytes = Box<dyn AsyncBufRead + Send + Unpin>;

/// Load all reviews from a file path or an HTTP(S) URL
pub async fn load(source: &str, report: &ProgressReport) -> Result<Vec<Record>> {
    let bytes = if is_url(source) {
        download(source, report).await?
    } else {
        open(source, report).await?
    };
    let records = parse(bytes, source).await?;
    log::debug!("Loaded {} reviews from {source}", records.len());
    Ok(records)
}

/// Truth that a data source should be downloaded
fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Start downloading the review table
async fn download(url: &str, report: &ProgressReport) -> Result<Bytes> {
    let response = reqwest::get(url)
        .await
        .and_then(Response::error_for_status)
        .with_context(|| format!("initiating download of {url}"))?;
    let tracker = response
        .content_length()
        .map(|len| report.add("Downloading reviews", ProgressConfig::new(Work::Bytes(len))));
    if tracker.is_none() {
        log::debug!("Server did not announce the size of {url}, won't track download progress");
    }

    // Translate reqwest errors into I/O errors
    let chunks = response.bytes_stream().map(|res| res.map_err(io::Error::other));
    Ok(Box::new(StreamReader::new(track(chunks, tracker))))
}

/// Start reading the review table from a local file
async fn open(path: &str, report: &ProgressReport) -> Result<Bytes> {
    let context = || format!("opening {path}");
    let file = tokio::fs::File::open(path).await.with_context(context)?;
    let len = file.metadata().await.with_context(context)?.len();
    let tracker = report.add(
        "Reading reviews",
        ProgressConfig::new(Work::Bytes(len)).dont_show_rate_eta(),
    );
    let chunks = ReaderStream::new(file);
    Ok(Box::new(StreamReader::new(track(chunks, Some(tracker)))))
}

/// Track how many input bytes have been read so far
fn track<B: AsRef<[u8]>>(
    chunks: impl futures::Stream<Item = io::Result<B>> + Send + Unpin,
    tracker: Option<ProgressTracker>,
) -> impl futures::Stream<Item = io::Result<B>> + Send + Unpin {
    chunks.map(move |res| {
        res.inspect(|chunk| {
            if let Some(tracker) = &tracker {
                tracker.make_progress(chunk.as_ref().len() as u64);
            }
        })
    })
}

/// Decode the review table
///
/// Input whose name ends with `.gz` is decompressed first. After that, a
/// `.tsv` name selects tab-separated values, anything else is parsed as CSV.
/// The first row must contain column names.
pub async fn parse(bytes: impl AsyncBufRead + Send + Unpin, source: &str) -> Result<Vec<Record>> {
    let (name, compressed) = match source.strip_suffix(".gz") {
        Some(name) => (name, true),
        None => (source, false),
    };
    let delimiter = if name.ends_with(".tsv") { b'\t' } else { b',' };
    if compressed {
        read_records(GzipDecoder::new(bytes), delimiter, source).await
    } else {
        read_records(bytes, delimiter, source).await
    }
}

/// Decode the rows of an uncompressed review table
async fn read_records(
    bytes: impl AsyncRead + Send + Unpin,
    delimiter: u8,
    source: &str,
) -> Result<Vec<Record>> {
    let mut rows = AsyncReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .create_deserializer(bytes)
        .into_deserialize::<Record>();
    let mut records = Vec::new();
    while let Some(row) = rows.next().await {
        let record = row.with_context(|| {
            format!("decoding review #{} from {source}", records.len())
        })?;
        records.push(record);
    }
    Ok(records)
}
