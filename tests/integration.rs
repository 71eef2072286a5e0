use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use energy_directory::{
    Company, CompanyFetcherBuilder, DirectoryError, EnergyType, FetchOutcome, FileSource,
    FilterSpec, NoticeLevel, SchemaMap, Source, fallback, featured_companies, filter_companies,
    get_by_id, get_by_slug, unique_filter_values,
};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// In-memory source that counts how often it is asked for data.
#[derive(Clone)]
struct MemorySource {
    text: String,
    calls: Arc<AtomicUsize>,
}

impl MemorySource {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Source for MemorySource {
    async fn fetch_text(&self) -> energy_directory::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// Source that always fails -- simulates an unreachable network.
#[derive(Clone)]
struct FailingSource {
    calls: Arc<AtomicUsize>,
}

impl FailingSource {
    fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Source for FailingSource {
    async fn fetch_text(&self) -> energy_directory::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DirectoryError::SourceRequest("simulated network error".into()))
    }
}

/// `Name,Website,Type,Desc` layout with one header row.
fn simple_schema() -> SchemaMap {
    SchemaMap::new()
        .name(0)
        .website(1)
        .energy_types(2)
        .description(3)
        .min_columns(4)
}

const EXPORT_CSV: &str = concat!(
    "Region,Country,Company,Energy Types,Description,Website,Contact,Logo,Notes,Tags,Status\r\n",
    "Bavaria,Germany,Sonnen Kraft,\"solar, biomass\",\"Community solar, co-op owned\",sonnen.example,,/logos/sonnen.png,,co-op;community,featured\r\n",
    "\r\n",
    "Jutland,Denmark,Vestwind,wind,\"Offshore \"\"mega\"\" turbines\",https://vestwind.example,,,,offshore;turbines,\r\n",
    "Catalonia,Spain,Sol Iberica,solar,Rooftop PV,javascript:alert(1),,,,rooftop,FEATURED\r\n",
    "Broken row\r\n",
    ",Norway,Fjord Hydro,\"hydro, wind\",,fjord.example/setup.exe,,,,,published\r\n",
);

// ---------------------------------------------------------------------------
// FileSource tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_source_reads_snapshot() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("companies.csv");
    tokio::fs::write(&path, EXPORT_CSV).await.unwrap();

    let text = FileSource::new(&path).fetch_text().await.unwrap();
    assert_eq!(text, EXPORT_CSV);
}

#[tokio::test]
async fn file_source_missing_file_is_request_error() {
    let tmp = TempDir::new().unwrap();
    let err = FileSource::new(tmp.path().join("missing.csv"))
        .fetch_text()
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::SourceRequest(_)));
}

#[tokio::test]
async fn e2e_file_source_through_fetcher() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("companies.csv");
    tokio::fs::write(&path, EXPORT_CSV).await.unwrap();

    let fetcher = CompanyFetcherBuilder::new(FileSource::new(&path))
        .build()
        .unwrap();
    let report = fetcher.fetch().await;
    assert!(report.is_live());
    assert_eq!(report.companies.len(), 4);
}

// ---------------------------------------------------------------------------
// End-to-end: published export layout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn e2e_export_layout_maps_every_field() {
    let fetcher = CompanyFetcherBuilder::new(MemorySource::new(EXPORT_CSV))
        .schema(SchemaMap::sheet_export())
        .build()
        .unwrap();
    let report = fetcher.fetch().await;

    assert!(report.is_live());
    assert_eq!(report.stats.rows_read, 5);
    assert_eq!(report.stats.skipped_rows, 1);
    assert_eq!(report.stats.sanitized_urls, 2);

    let ids: Vec<&str> = report.companies.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "5"]);

    let sonnen = &report.companies[0];
    assert_eq!(sonnen.name, "Sonnen Kraft");
    assert_eq!(sonnen.website, "https://sonnen.example");
    assert_eq!(sonnen.description, "Community solar, co-op owned");
    assert_eq!(
        sonnen.energy_types,
        vec![EnergyType::Solar, EnergyType::Biomass]
    );
    assert_eq!(sonnen.region.as_deref(), Some("Bavaria"));
    assert_eq!(sonnen.logo.as_deref(), Some("/logos/sonnen.png"));
    assert_eq!(
        sonnen.tags,
        Some(vec!["co-op".to_string(), "community".to_string()])
    );
    assert!(sonnen.featured);

    let vestwind = &report.companies[1];
    assert_eq!(vestwind.description, "Offshore \"mega\" turbines");
    assert!(!vestwind.featured);

    let sol = &report.companies[2];
    assert_eq!(sol.website, "#");
    assert!(sol.featured);

    let fjord = &report.companies[3];
    assert_eq!(fjord.website, "#");
    assert_eq!(fjord.location, "Unknown");
    assert_eq!(fjord.region, None);
    assert_eq!(fjord.description, "No description provided");
    assert!(!fjord.featured);

    let notice = report.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.contains("2 potentially unsafe URLs"));
    assert!(notice.message.contains("1 row was skipped"));
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_a_single_company() {
    let source = MemorySource::new(concat!(
        "Name,Website,Type,Desc\n",
        "Acme,https://acme.example,solar,Desc text\n",
    ));
    let fetcher = CompanyFetcherBuilder::new(source)
        .schema(simple_schema())
        .build()
        .unwrap();
    let report = fetcher.fetch().await;

    assert!(report.is_live());
    assert_eq!(report.companies.len(), 1);
    let acme = &report.companies[0];
    assert_eq!(acme.name, "Acme");
    assert_eq!(acme.energy_types, vec![EnergyType::Solar]);
    assert_eq!(acme.website, "https://acme.example");
    assert_eq!(report.stats.sanitized_urls, 0);
    assert!(report.notice().is_none());
}

#[tokio::test]
async fn scenario_b_unsafe_website() {
    let source = MemorySource::new(concat!(
        "Name,Website,Type,Desc\n",
        "Acme,javascript:alert(1),solar,Desc text\n",
    ));
    let fetcher = CompanyFetcherBuilder::new(source)
        .schema(simple_schema())
        .build()
        .unwrap();
    let report = fetcher.fetch().await;

    assert_eq!(report.companies[0].website, "#");
    assert_eq!(report.stats.sanitized_urls, 1);
    assert_eq!(report.notice().unwrap().level, NoticeLevel::Warning);
}

#[tokio::test]
async fn scenario_c_unreachable_source_serves_fallback_once() {
    let source = FailingSource::new();
    let calls = source.calls.clone();
    let fetcher = CompanyFetcherBuilder::new(source).build().unwrap();

    let report = fetcher.fetch().await;

    assert!(!report.is_live());
    assert!(matches!(
        report.outcome,
        FetchOutcome::Fallback(DirectoryError::SourceRequest(_))
    ));
    assert_eq!(report.companies, fallback::sample_companies());
    assert!(!report.companies.is_empty());
    assert_eq!(report.notice().unwrap().level, NoticeLevel::Error);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "no retries");
}

#[tokio::test]
async fn scenario_d_filter_by_wind() {
    let fetcher = CompanyFetcherBuilder::new(MemorySource::new(EXPORT_CSV))
        .build()
        .unwrap();
    let companies = fetcher.fetch().await.into_companies();

    let spec = FilterSpec {
        energy_types: vec![EnergyType::Wind],
        countries: vec![],
        regions: vec![],
        search_term: String::new(),
        featured: false,
        ..Default::default()
    };
    let wind = filter_companies(&companies, &spec);
    let expected: Vec<Company> = companies
        .iter()
        .filter(|c| c.has_energy_type(EnergyType::Wind))
        .cloned()
        .collect();
    assert_eq!(wind, expected);
    let names: Vec<&str> = wind.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Vestwind", "Fjord Hydro"]);
}

// ---------------------------------------------------------------------------
// Builder and fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn custom_fallback_is_served() {
    let mut custom = fallback::sample_companies();
    custom.truncate(1);
    let fetcher = CompanyFetcherBuilder::new(MemorySource::new("   \n"))
        .fallback(custom.clone())
        .build()
        .unwrap();

    let report = fetcher.fetch().await;
    assert!(matches!(
        report.outcome,
        FetchOutcome::Fallback(DirectoryError::EmptyBody)
    ));
    assert_eq!(report.companies, custom);
}

#[test]
fn empty_fallback_is_rejected() {
    let result = CompanyFetcherBuilder::new(MemorySource::new(""))
        .fallback(vec![])
        .build();
    assert!(matches!(result, Err(DirectoryError::Config(_))));
}

#[tokio::test]
async fn every_fetch_reads_the_source_again() {
    let source = MemorySource::new(EXPORT_CSV);
    let calls = source.calls.clone();
    let fetcher = CompanyFetcherBuilder::new(source).build().unwrap();

    let first = fetcher.fetch().await.into_companies();
    let second = fetcher.fetch().await.into_companies();
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ---------------------------------------------------------------------------
// Consuming the collection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn e2e_facets_lookups_and_featured() {
    let fetcher = CompanyFetcherBuilder::new(MemorySource::new(EXPORT_CSV))
        .build()
        .unwrap();
    let companies = fetcher.fetch().await.into_companies();

    let values = unique_filter_values(&companies);
    assert_eq!(values.countries, vec!["Denmark", "Germany", "Norway", "Spain"]);
    assert_eq!(values.regions, vec!["Bavaria", "Catalonia", "Jutland"]);
    assert_eq!(
        values.energy_types,
        vec![
            EnergyType::Biomass,
            EnergyType::Hydro,
            EnergyType::Solar,
            EnergyType::Wind
        ]
    );

    assert_eq!(get_by_id(&companies, "5").unwrap().name, "Fjord Hydro");
    assert!(get_by_id(&companies, "4").is_none());

    let sol = get_by_slug(&companies, "sol-iberica.html").unwrap();
    assert_eq!(sol.id, "3");
    assert_eq!(get_by_slug(&companies, "Sol-Iberica").unwrap().id, "3");

    let featured: Vec<String> = featured_companies(&companies)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(featured, vec!["Sol Iberica", "Sonnen Kraft"]);
}

#[tokio::test]
async fn e2e_query_driven_filtering() {
    let fetcher = CompanyFetcherBuilder::new(MemorySource::new(EXPORT_CSV))
        .build()
        .unwrap();
    let companies = fetcher.fetch().await.into_companies();

    let spec = FilterSpec::from_query("?type=solar&featured=true&search=ROOFTOP");
    let hits = filter_companies(&companies, &spec);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Sol Iberica");

    let spec = FilterSpec::from_query("region=Jutland");
    let hits = filter_companies(&companies, &spec);
    let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
    // Fjord Hydro has no region and is kept.
    assert_eq!(names, vec!["Vestwind", "Fjord Hydro"]);
}

#[test]
fn company_serializes_with_camel_case_fields() {
    let company = fallback::sample_companies().remove(0);
    let json = serde_json::to_value(&company).unwrap();
    assert_eq!(json["energyTypes"], serde_json::json!(["solar"]));
    assert_eq!(json["featured"], serde_json::json!(true));
    assert!(json.get("contactEmail").is_none());

    let back: Company = serde_json::from_value(json).unwrap();
    assert_eq!(back, company);
}

// ---------------------------------------------------------------------------
// HttpSource tests
// ---------------------------------------------------------------------------

#[cfg(feature = "http")]
mod http {
    use super::*;

    use energy_directory::HttpSource;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Accept one connection, answer with `response`, and hand back the
    /// request head that was received.
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });
        (format!("http://{addr}/companies.csv"), handle)
    }

    #[tokio::test]
    async fn http_source_fetches_without_cache() {
        let body = "Name,Website,Type,Desc\nAcme,acme.example,wind,Turbines\n";
        let (url, server) = serve_once(http_response("200 OK", body)).await;

        let source = HttpSource::with_client(client(), url);
        let text = source.fetch_text().await.unwrap();
        assert_eq!(text, body);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /companies.csv"));
        assert!(request.contains("cache-control: no-cache"));
        assert!(request.contains("pragma: no-cache"));
    }

    #[tokio::test]
    async fn http_error_status_falls_back() {
        let response = http_response("500 Internal Server Error", "oops");
        let (url, server) = serve_once(response).await;

        let fetcher = CompanyFetcherBuilder::new(HttpSource::with_client(client(), url))
            .build()
            .unwrap();
        let report = fetcher.fetch().await;
        server.await.unwrap();

        assert!(matches!(
            report.outcome,
            FetchOutcome::Fallback(DirectoryError::SourceStatus(500))
        ));
        assert_eq!(report.companies, fallback::sample_companies());
    }

    #[tokio::test]
    async fn http_unreachable_host_falls_back() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/companies.csv");
        let source = HttpSource::with_client(client(), url);
        let fetcher = CompanyFetcherBuilder::new(source).build().unwrap();
        let report = fetcher.fetch().await;

        assert!(matches!(
            report.outcome,
            FetchOutcome::Fallback(DirectoryError::SourceRequest(_))
        ));
        assert!(!report.companies.is_empty());
    }

    #[tokio::test]
    async fn e2e_http_live_data() {
        let body = "Name,Website,Type,Desc\r\nAcme,acme.example,wind,Turbines\r\n";
        let (url, server) = serve_once(http_response("200 OK", body)).await;

        let fetcher = CompanyFetcherBuilder::new(HttpSource::with_client(client(), url))
            .schema(simple_schema())
            .build()
            .unwrap();
        let report = fetcher.fetch().await;
        server.await.unwrap();

        assert!(report.is_live());
        assert_eq!(report.companies[0].website, "https://acme.example");
        assert_eq!(report.companies[0].energy_types, vec![EnergyType::Wind]);
    }
}
