use serde::Deserialize;
use tap::Tap;

use crate::{
    image,
    manifest::{sealed, Manifest},
    model::{GalleryEntry, NO_DATE, NO_TITLE, UNKNOWN_AUTHOR, UNKNOWN_INSTITUTION},
};

const TITLE_LABELS: &[&str] = &["Title", "Short Title"];
const AUTHOR_LABELS: &[&str] = &["Author"];
const DATE_LABELS: &[&str] = &["Date"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("structure: {0}")]
    Structure(&'static str),

    #[error("canvas {canvas}: missing {field}")]
    MissingField { canvas: usize, field: &'static str },

    #[error("canvas {canvas}: malformed: {source}")]
    Malformed {
        canvas: usize,
        source: serde_json::Error,
    },
}

/// One entry per usable canvas of the first sequence, in canvas order.
///
/// Canvases without an image service are skipped with a warning; only a missing or
/// empty sequence/canvas list fails the whole manifest.
pub fn extract(manifest: &Manifest) -> Result<Vec<GalleryEntry>, Error> {
    let sequence = manifest
        .raw
        .sequences
        .first()
        .ok_or(Error::Structure("manifest has no sequences"))?;
    let canvases = sealed::canvases(sequence);

    if canvases.is_empty() {
        return Err(Error::Structure("first sequence has no canvases"));
    }

    let attribution = manifest.attribution().unwrap_or(UNKNOWN_INSTITUTION);

    let entries = canvases
        .iter()
        .enumerate()
        .filter_map(|(i, value)| match extract_canvas(i, value, attribution) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skip {err}");
                None
            }
        })
        .collect::<Vec<_>>()
        .tap(|entries| {
            tracing::debug!(
                "extracted {} of {} canvases",
                entries.len(),
                canvases.len()
            )
        });

    Ok(entries)
}

fn extract_canvas(
    index: usize,
    value: &serde_json::Value,
    attribution: &str,
) -> Result<GalleryEntry, Error> {
    let canvas = sealed::Canvas::deserialize(value).map_err(|source| Error::Malformed {
        canvas: index,
        source,
    })?;

    let service_id = canvas
        .images
        .first()
        .and_then(|image| image.resource.as_ref())
        .and_then(|resource| resource.first_service())
        .and_then(|service| service.id.as_deref())
        .filter(|id| !id.trim().is_empty())
        .ok_or(Error::MissingField {
            canvas: index,
            field: "images[0].resource.service.@id",
        })?;

    let thumbnail_url = image::thumbnail_url(service_id);
    let metadata = canvas.metadata();

    tracing::debug!("canvas {index} ({:?}): {thumbnail_url}", canvas.id);

    Ok(GalleryEntry::new(
        thumbnail_url,
        lookup(&metadata, TITLE_LABELS).unwrap_or(NO_TITLE),
        lookup(&metadata, AUTHOR_LABELS).unwrap_or(UNKNOWN_AUTHOR),
        lookup(&metadata, DATE_LABELS).unwrap_or(NO_DATE),
        attribution,
    ))
}

/// Labels are tried in order; for each label the first matching pair wins.
fn lookup<'a>(metadata: &'a [sealed::Metadata], labels: &[&str]) -> Option<&'a str> {
    labels.iter().find_map(|label| {
        metadata
            .iter()
            .find(|m| sealed::first_text(&m.label) == Some(*label))
            .and_then(|m| sealed::first_text(&m.value))
    })
}
