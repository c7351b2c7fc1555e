//! The fetch → map → build → write pipeline.

use std::path::{Path, PathBuf};

use url::Url;

use crate::config::Config;
use crate::feed::{map_records, write_atomic, ChannelMeta, FeedDocument, FeedFetcher};
use crate::{FeedError, Result};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of items in the written document.
    pub item_count: usize,
    /// Where the document was written.
    pub output_path: PathBuf,
}

/// One configured feed pipeline.
///
/// Built once at startup and shared by the trigger handler or the `run`
/// command. Holds no state between runs.
#[derive(Debug, Clone)]
pub struct FeedPipeline {
    fetcher: FeedFetcher,
    api_url: String,
    base_url: Url,
    channel: ChannelMeta,
    output_path: PathBuf,
}

impl FeedPipeline {
    /// Build the pipeline from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.feed.base_url)
            .map_err(|e| FeedError::Config(format!("invalid base_url: {e}")))?;

        Ok(Self {
            fetcher: FeedFetcher::new(&config.upstream)?,
            api_url: config.upstream.api_url.clone(),
            base_url,
            channel: ChannelMeta {
                title: config.feed.title.clone(),
                link: config.channel_link().to_string(),
                description: config.feed.description.clone(),
            },
            output_path: PathBuf::from(&config.output.path),
        })
    }

    /// Path of the generated artifact.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Fetch, transform and render without touching the artifact.
    pub async fn render(&self) -> Result<(usize, Vec<u8>)> {
        let records = self.fetcher.fetch(&self.api_url).await?;
        tracing::info!(count = records.len(), "Fetched upstream records");

        let items = map_records(&records, &self.base_url)?;
        let item_count = items.len();

        let document = FeedDocument::build(&self.channel, items);
        Ok((item_count, document.to_xml()?))
    }

    /// Run the whole pipeline once.
    ///
    /// The artifact is only replaced after every earlier step succeeded.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting feed run");

        let (item_count, xml) = self.render().await?;
        write_atomic(&self.output_path, &xml)?;

        tracing::info!(
            items = item_count,
            path = %self.output_path.display(),
            "Wrote feed"
        );

        Ok(RunSummary {
            item_count,
            output_path: self.output_path.clone(),
        })
    }
}
