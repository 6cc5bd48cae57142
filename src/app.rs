//! Application state and the commands a front end dispatches into it.

use std::fmt::Display;

use reqwest::Client;

use crate::{
    canvas,
    collection::{self, Exporter},
    gallery::{EntryId, Gallery, Removal},
    manifest,
    model::ManifestReference,
    network::http,
    query::{self, DeepLink},
    Config,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Info(x) => write!(f, "{x}"),
            Notice::Error(x) => write!(f, "error: {x}"),
        }
    }
}

/// What the core needs from whatever draws the gallery.
pub trait Ui {
    fn notify(&mut self, notice: Notice);

    /// Synchronous yes/no; nothing is mutated before it returns.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Viewer bridge: replace the deep-zoom target with this `info.json` URL.
    fn view(&mut self, info_url: &str);
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub added: Vec<EntryId>,
    /// (manifest url as given, reason)
    pub failed: Vec<(String, crate::Error)>,
}

pub struct App<U> {
    ui: U,
    client: Client,
    gallery: Gallery,
    exporter: Exporter,
    title: String,
}

impl<U: Ui> App<U> {
    pub fn init(config: &Config, ui: U) -> crate::Result<Self> {
        let client = http::client(&config.user_agent)?;

        Ok(Self::with_client(config, ui, client))
    }

    pub fn with_client(config: &Config, ui: U, client: Client) -> Self {
        let exporter = Exporter::new(client.clone(), &config.save_endpoint, config.envelope);

        tracing::debug!("init: {config:?}");

        Self {
            ui,
            client,
            gallery: Gallery::new(),
            exporter,
            title: String::new(),
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Comma separated manifest urls.
    pub async fn on_add_manifests(&mut self, urls: &str) -> BatchReport {
        self.add_all(query::split_list(urls)).await
    }

    /// Strictly sequential: each manifest is fetched and extracted before the next one
    /// starts, so cards land in input order. A failure only drops that manifest.
    pub async fn add_all(&mut self, urls: impl IntoIterator<Item = String>) -> BatchReport {
        let mut report = BatchReport::default();

        for url in urls {
            match self.add_manifest(&url).await {
                Ok(ids) => {
                    tracing::debug!("{url}: {} entries", ids.len());
                    report.added.extend(ids);
                }
                Err(err) => {
                    tracing::warn!("{url}: {err}");
                    self.ui.notify(Notice::Error(format!(
                        "Failed to load manifest {url}: {err}"
                    )));
                    report.failed.push((url, err));
                }
            }
        }

        report
    }

    async fn add_manifest(&mut self, url: &str) -> crate::Result<Vec<EntryId>> {
        let reference = ManifestReference::parse(url)?;
        let manifest = manifest::fetch(&self.client, &reference).await?;
        let entries = canvas::extract(&manifest)?;

        Ok(self.gallery.extend(entries))
    }

    pub fn on_remove_entry(&mut self, id: EntryId) -> Removal {
        let ui = &mut self.ui;

        self.gallery.remove(id, |entry| {
            ui.confirm(&format!("Remove \"{}\" from the gallery?", entry.title))
        })
    }

    /// Returns `false` when `id` is not in the gallery.
    pub fn on_open_entry(&mut self, id: EntryId) -> bool {
        match self.gallery.get(id) {
            Some(entry) => {
                self.ui.view(&entry.info_url);
                true
            }
            None => false,
        }
    }

    pub async fn on_save_collection(
        &mut self,
        name: &str,
        title: &str,
    ) -> Result<(), collection::Error> {
        let result = self
            .exporter
            .export(name, title, self.gallery.entries())
            .await;

        let notice = match &result {
            Ok(()) => Notice::Info("Collection saved successfully!".to_owned()),
            Err(collection::Error::Validation) => {
                Notice::Error("Please enter a collection name".to_owned())
            }
            Err(err) => Notice::Error(format!("Failed to save collection: {err}")),
        };

        self.ui.notify(notice);

        result
    }

    /// Page-load entry point: `title` and `manifests` query parameters.
    pub async fn load_deep_link(&mut self, input: &str) -> BatchReport {
        let DeepLink { title, manifests } = DeepLink::parse(input);

        if let Some(title) = title {
            self.title = title;
        }

        self.add_all(manifests).await
    }
}
