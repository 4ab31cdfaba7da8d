use super::filter::DiskFilter;
use crate::config::AppConfig;
use crate::error::Error;
use crate::model::{ContentRecord, Disk};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("disk-inventory/", env!("CARGO_PKG_VERSION"));

/// One page of the disk list. Backends without pagination return a bare
/// array, which is read as a single page with no cursors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DiskPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Disk>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Page(DiskPage),
    Plain(Vec<Disk>),
}

impl From<ListBody> for DiskPage {
    fn from(body: ListBody) -> Self {
        match body {
            ListBody::Page(page) => page,
            ListBody::Plain(results) => DiskPage {
                count: Some(results.len() as u64),
                results,
                ..Default::default()
            },
        }
    }
}

/// Blocking client for the disk inventory REST backend.
pub struct DiskApi {
    http: Client,
    base: Url,
}

impl DiskApi {
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let base = base_url(&config.api_base_url)?;
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if is_loopback(&base) {
            builder = builder.no_proxy();
        }
        Ok(Self {
            http: builder.build()?,
            base,
        })
    }

    pub fn list_disks(&self, filter: &DiskFilter) -> Result<DiskPage, Error> {
        let mut url = self.endpoint("discos/")?;
        {
            let pairs = filter.to_query_pairs();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }
        self.fetch_page(url)
    }

    /// Follow a `next`/`previous` cursor returned by the backend.
    pub fn next_page(&self, cursor: &str) -> Result<DiskPage, Error> {
        self.fetch_page(Url::parse(cursor)?)
    }

    /// Fetch every page matching `filter`.
    pub fn list_all(&self, filter: &DiskFilter) -> Result<Vec<Disk>, Error> {
        let mut page = self.list_disks(filter)?;
        let mut disks = std::mem::take(&mut page.results);
        while let Some(next) = page.next.take() {
            page = self.next_page(&next)?;
            disks.append(&mut page.results);
        }
        Ok(disks)
    }

    pub fn get_disk(&self, id: i64) -> Result<Disk, Error> {
        let url = self.disk_url(id)?;
        self.send_json(self.http.get(url))
    }

    pub fn create_disk(&self, disk: &Disk) -> Result<Disk, Error> {
        disk.validate()?;
        let url = self.endpoint("discos/")?;
        self.send_json(self.http.post(url).json(disk))
    }

    pub fn update_disk(&self, id: i64, disk: &Disk) -> Result<Disk, Error> {
        disk.validate()?;
        let url = self.disk_url(id)?;
        self.send_json(self.http.put(url).json(disk))
    }

    pub fn delete_disk(&self, id: i64) -> Result<(), Error> {
        let url = self.disk_url(id)?;
        send(self.http.delete(url))?;
        Ok(())
    }

    /// Ask the backend to list a directory on its own filesystem. Folder
    /// sizes come back as zero; only files are weighed server-side.
    pub fn scan_remote(&self, path: &str) -> Result<Vec<ContentRecord>, Error> {
        let mut url = self.endpoint("discos/scan/")?;
        url.query_pairs_mut().append_pair("path", path);
        self.send_json(self.http.get(url))
    }

    fn fetch_page(&self, url: Url) -> Result<DiskPage, Error> {
        let body: ListBody = self.send_json(self.http.get(url))?;
        Ok(body.into())
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let body = send(request)?.unwrap_or_default();
        Ok(serde_json::from_str(&body)?)
    }

    fn disk_url(&self, id: i64) -> Result<Url, Error> {
        self.endpoint(&format!("discos/{}/", id))
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base.join(path)?)
    }
}

/// Make sure the base ends in `/` so relative joins append instead of
/// replacing the last segment.
fn base_url(raw: &str) -> Result<Url, Error> {
    let mut base = raw.trim().trim_end_matches('/').to_string();
    base.push('/');
    Ok(Url::parse(&base)?)
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(d)) => d.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Send a request and hand back the body, or `None` for 204 No Content.
fn send(request: RequestBuilder) -> Result<Option<String>, Error> {
    let res = request.send()?;
    let status = res.status();
    debug!("{} {}", status.as_u16(), res.url());

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let text = res.text()?;
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            message: error_message(&text),
        });
    }
    Ok(Some(text))
}

/// Pull a readable message out of an error body: `error`, then `message`,
/// then `detail`, then per-field validation messages.
fn error_message(body: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return "Request failed".to_string(),
    };

    for key in ["error", "message", "detail"] {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }

    if let Some(fields) = value.as_object() {
        let messages: Vec<String> = fields
            .iter()
            .filter_map(|(field, v)| {
                let text = match v {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|i| i.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    _ => return None,
                };
                (!text.is_empty()).then(|| format!("{}: {}", field, text))
            })
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }

    "Request failed".to_string()
}
