use async_trait::async_trait;

use crate::page::PageText;
use crate::record::{assemble, CpuRecord};

const BASE_URL: &str = "https://www.cpubenchmark.net/cpu.php?cpu=";

/// A wrapped [`reqwest::Client`].
/// Some scrapers require cookies, while some don't need cookies.
/// This struct takes advantage of Rust's static typing to make sure
/// that scrapers that require cookies are never given a [`reqwest::Client`]
/// that does not have a cookie jar.
pub struct Client<const COOKIES: bool>(pub reqwest::Client);

impl<const COOKIES: bool> Default for Client<COOKIES> {
    fn default() -> Self {
        Self(
            reqwest::Client::builder()
                .cookie_store(COOKIES)
                .build()
                .unwrap(),
        )
    }
}

/// The page-fetch collaborator: given a CPU identifier, return the rendered
/// text of its spec page. The rest of the pipeline only ever consumes the
/// resulting [`PageText`], so tests can substitute canned pages.
#[async_trait]
pub trait PageSource {
    async fn fetch_page(&self, cpu: &str) -> anyhow::Result<PageText>;
}

/// Live cpubenchmark.net pages. The identifier goes into the query string
/// verbatim; it must match the site's exact vocabulary (see the `-e` flag
/// for examples).
pub struct CpuBenchmarkSite {
    /* the site hands out a session cookie on the first request */
    client: Client<true>,
}

impl Default for CpuBenchmarkSite {
    fn default() -> Self {
        Self {
            client: Client::default(),
        }
    }
}

#[async_trait]
impl PageSource for CpuBenchmarkSite {
    async fn fetch_page(&self, cpu: &str) -> anyhow::Result<PageText> {
        let res = self
            .client
            .0
            .get(format!("{}{}", BASE_URL, cpu))
            .send()
            .await?;
        let html = res.text().await?;
        PageText::from_html(&html)
    }
}

/// Run the full per-CPU pipeline over one batch, in request order.
///
/// # Errors
/// The first CPU that fails to fetch or parse aborts the remaining CPUs in
/// the batch and discards the batch's completed records; the error names
/// the offending identifier.
pub async fn gather<S: PageSource>(source: &S, cpus: &[String]) -> anyhow::Result<Vec<CpuRecord>> {
    let mut records = Vec::with_capacity(cpus.len());
    for cpu in cpus {
        let page = source
            .fetch_page(cpu)
            .await
            .map_err(|e| e.context(format!("error gathering CPU data for '{}'", cpu)))?;
        let record =
            assemble(&page).map_err(|e| e.context(format!("error gathering CPU data for '{}'", cpu)))?;
        log::info!("{}", record.name);
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::page::PageText;

    use super::{gather, PageSource};

    /// Canned pages keyed by identifier; unknown identifiers fail like a
    /// transport error would.
    struct FixtureSource;

    #[async_trait]
    impl PageSource for FixtureSource {
        async fn fetch_page(&self, cpu: &str) -> anyhow::Result<PageText> {
            match cpu {
                "good" => Ok(PageText::new(
                    "Good CPU",
                    &["Average CPU Mark 1200"],
                    &["Cores: 4 Threads: 8"],
                )),
                "unscored" => Ok(PageText::new("Unscored CPU", &["Class: Desktop"], &[])),
                _ => anyhow::bail!("no such page"),
            }
        }
    }

    #[tokio::test]
    async fn test_gather_in_request_order() {
        let cpus = vec!["good".to_string(), "good".to_string()];
        let records = gather(&FixtureSource, &cpus).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Good CPU");
        assert_eq!(records[0].cores, "4");
    }

    #[tokio::test]
    async fn test_gather_aborts_batch_and_names_the_cpu() {
        let cpus = vec!["good".to_string(), "unscored".to_string(), "good".to_string()];
        let err = gather(&FixtureSource, &cpus).await.unwrap_err();
        assert!(format!("{:#}", err).contains("unscored"));
    }
}
