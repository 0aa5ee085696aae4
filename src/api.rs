use anyhow::Context as _;
use serde::Deserialize;

use crate::book::{Book, BookRecord};

/// Client for the collaborator book API. One HTTP request per operation, no
/// retry and no timeout: failures propagate to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BooksEnvelope {
    books: Vec<Book>,
}

#[derive(Debug, Deserialize)]
struct BookEnvelope {
    book: Book,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let parsed =
            url::Url::parse(base_url).with_context(|| format!("parse api url: {base_url}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("api url must be http/https: {base_url}");
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub async fn list_books(&self) -> anyhow::Result<Vec<Book>> {
        let raw = self
            .send_ok(self.client.get(&self.base_url), &self.base_url)
            .await?;
        let envelope: BooksEnvelope =
            serde_json::from_str(&raw).context("parse book list response")?;
        Ok(envelope.books)
    }

    pub async fn get_book(&self, id: u64) -> anyhow::Result<Book> {
        let url = self.book_url(id);
        let raw = self.send_ok(self.client.get(&url), &url).await?;
        let envelope: BookEnvelope = serde_json::from_str(&raw).context("parse book response")?;
        Ok(envelope.book)
    }

    pub async fn create_book(&self, record: &BookRecord) -> anyhow::Result<()> {
        self.send_ok(self.client.post(&self.base_url).json(record), &self.base_url)
            .await?;
        Ok(())
    }

    pub async fn update_book(&self, id: u64, record: &BookRecord) -> anyhow::Result<()> {
        let url = self.book_url(id);
        self.send_ok(self.client.put(&url).json(record), &url)
            .await?;
        Ok(())
    }

    pub async fn delete_book(&self, id: u64) -> anyhow::Result<()> {
        let url = self.book_url(id);
        self.send_ok(self.client.delete(&url), &url).await?;
        Ok(())
    }

    fn book_url(&self, id: u64) -> String {
        format!("{}/{id}", self.base_url)
    }

    async fn send_ok(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> anyhow::Result<String> {
        let response = request
            .send()
            .await
            .with_context(|| format!("request {url}"))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .with_context(|| format!("read response body: {url}"))?;
        if !status.is_success() {
            anyhow::bail!("book api error ({status}): {raw}");
        }

        Ok(raw)
    }
}
