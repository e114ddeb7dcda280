//! End-to-end runs of the statement pipeline against a stubbed renderer.

mod common;

use common::fixtures::*;
use common::{StubBackend, TestResult, Workspace};
use folio::{
    CommandCandidate, ExternalRenderer, GatewayError, InMemorySource, PaginationState,
    PipelineBuilder, PipelineError,
};
use folio_source::SourceError;
use folio_template_core::unresolved_placeholders;
use std::fs;
use std::time::{Duration, SystemTime};

#[test]
fn test_single_page_probe_selects_single_page_footer() -> TestResult {
    let ws = Workspace::new(pagination_template(), &full_statement());
    let report = ws.run(StubBackend::pages(1))?;

    assert_eq!(report.pagination.state, PaginationState::FinalRendered);
    assert!(report.pagination.context.is_single_page);
    let html = ws.read("dist/statement.html");
    assert!(html.contains("class=\"single-page\""));
    assert!(html.contains("data-single=\"true\""));
    assert!(html.contains("data-count=\"1\""));
    assert!(html.contains("statement-footer--single"));
    Ok(())
}

#[test]
fn test_multi_page_probe_shows_page_total() -> TestResult {
    let ws = Workspace::new(pagination_template(), &full_statement());
    let report = ws.run(StubBackend::pages(2))?;

    assert!(!report.pagination.context.is_single_page);
    assert_eq!(report.pagination.context.page_count, Some(2));
    let html = ws.read("dist/statement.html");
    assert!(html.contains("data-single=\"false\""));
    assert!(html.contains("class=\"multi-page\""));
    assert!(html.contains("Page <span class=\"page-number\"></span> of 2</footer>"));
    Ok(())
}

#[test]
fn test_failed_probe_uses_configured_fallback() -> TestResult {
    let ws = Workspace::new(pagination_template(), &full_statement());
    let config = folio::StatementConfig {
        fallback_page_count: Some(3),
        ..ws.config()
    };
    let report = ws.run_with(config, StubBackend::failing(), false)?;

    assert!(!report.pagination.context.is_single_page);
    assert_eq!(report.pagination.context.page_count, Some(3));
    assert!(ws.read("dist/statement.html").contains("data-count=\"3\""));
    Ok(())
}

#[test]
fn test_failed_probe_uses_record_default_but_stays_multi_page() -> TestResult {
    let ws = Workspace::new(pagination_template(), &full_statement());
    let report = ws.run(StubBackend::failing())?;

    assert!(!report.pagination.context.is_single_page);
    assert_eq!(report.pagination.context.page_count, Some(1));
    let html = ws.read("dist/statement.html");
    assert!(html.contains("statement-footer--multi"));
    assert!(html.contains(" of 1</footer>"));
    Ok(())
}

#[test]
fn test_failed_probe_without_fallback_leaves_page_count_marker() -> TestResult {
    let ws = Workspace::new(pagination_template(), &statement_without_default_page_count());
    let report = ws.run(StubBackend::failing())?;

    assert_eq!(report.pagination.context.page_count, None);
    assert!(!report.pagination.rewritten);
    assert_eq!(report.pagination.unresolved_placeholders, 1);
    assert!(ws.read("dist/statement.html").contains("data-count=\"{{render.pageCount}}\""));
    Ok(())
}

#[test]
fn test_identical_final_render_does_not_touch_the_file() -> TestResult {
    let ws = Workspace::new(statement_template(), &statement_without_default_page_count());
    let backdated = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    let report = ws.run(StubBackend::failing().backdating(backdated))?;

    assert!(!report.pagination.rewritten);
    let modified = fs::metadata(ws.path("dist/statement.html"))?.modified()?;
    assert_eq!(modified, backdated);
    Ok(())
}

#[test]
fn test_changed_final_render_rewrites_the_file() -> TestResult {
    let ws = Workspace::new(statement_template(), &full_statement());
    let backdated = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    let report = ws.run(StubBackend::pages(2).backdating(backdated))?;

    assert!(report.pagination.rewritten);
    let modified = fs::metadata(ws.path("dist/statement.html"))?.modified()?;
    assert_ne!(modified, backdated);
    Ok(())
}

#[test]
fn test_fully_populated_statement_leaves_no_markers() -> TestResult {
    let ws = Workspace::new(statement_template(), &full_statement());
    let report = ws.run(StubBackend::pages(2))?;

    let html = ws.read("dist/statement.html");
    assert_eq!(report.pagination.unresolved_placeholders, 0);
    assert!(unresolved_placeholders(&html).is_empty());
    assert!(html.contains("<h1>Harbor Ridge Credit Union</h1>"));
    assert!(html.contains("18 Birch Lane<br>Falmouth, ME 04105"));
    assert!(html.contains("$2,200.00"));
    Ok(())
}

#[test]
fn test_null_field_marker_is_preserved() -> TestResult {
    let ws = Workspace::new(statement_template(), &statement_with_null("customer", "email"));
    let report = ws.run(StubBackend::pages(2))?;

    let html = ws.read("dist/statement.html");
    assert!(html.contains("<p class=\"email\">{{customer.email}}</p>"));
    assert_eq!(report.pagination.unresolved_placeholders, 1);
    Ok(())
}

#[test]
fn test_empty_transactions_render_one_spanning_row() -> TestResult {
    let ws = Workspace::new(statement_template(), &statement_without_transactions());
    ws.run(StubBackend::pages(1))?;

    let html = ws.read("dist/statement.html");
    let start = html.find("<section class=\"transactions\">").unwrap();
    let end = start + html[start..].find("</section>").unwrap();
    let section = &html[start..end];

    // Header row plus the empty-state row.
    assert_eq!(section.matches("<tr").count(), 2);
    assert!(section.contains(
        "<tr class=\"empty-state\"><td colspan=\"7\">No transactions recorded.</td></tr>"
    ));
    Ok(())
}

#[test]
fn test_pdf_run_inlines_styles_and_writes_artifact() -> TestResult {
    let ws = Workspace::new(statement_template(), &full_statement());
    ws.write("styles/statement.css", "body { color: #111; }");
    ws.write("styles/print.css", ".page-number::after { content: counter(page); }");

    let report = ws.run_with(ws.config(), StubBackend::pages(2), true)?;

    assert_eq!(report.pdf_path, Some(ws.path("dist/statement.pdf")));
    assert!(ws.path("dist/statement.pdf").exists());
    let html = ws.read("dist/statement.html");
    assert!(!html.contains("rel=\"stylesheet\""));
    assert_eq!(html.matches("<style>").count(), 1);
    let print = html.find(".page-number::after").unwrap();
    let base = html.find("body { color: #111; }").unwrap();
    assert!(print < base);
    Ok(())
}

#[test]
fn test_html_run_keeps_links_and_copies_static_dirs() -> TestResult {
    let ws = Workspace::new(statement_template(), &full_statement());
    ws.write("styles/statement.css", "body {}");
    ws.write("assets/logo.svg", "<svg/>");

    let report = ws.run(StubBackend::pages(1))?;

    assert_eq!(report.pdf_path, None);
    assert!(!ws.path("dist/statement.pdf").exists());
    let html = ws.read("dist/statement.html");
    assert!(html.contains("<link rel=\"stylesheet\" href=\"styles/statement.css\">"));
    assert_eq!(ws.read("dist/styles/statement.css"), "body {}");
    assert_eq!(ws.read("dist/assets/logo.svg"), "<svg/>");
    Ok(())
}

#[test]
fn test_missing_data_record_is_fatal() {
    let ws = Workspace::new(statement_template(), &full_statement());
    fs::remove_file(ws.path("data/statement.json")).unwrap();

    let err = ws.run(StubBackend::pages(1)).unwrap_err();
    assert!(matches!(err, PipelineError::Source(SourceError::NotFound(_))));
    assert!(!ws.path("dist/statement.html").exists());
}

#[test]
fn test_malformed_data_record_is_fatal() {
    let ws = Workspace::new(statement_template(), &full_statement());
    ws.write("data/statement.json", "{ \"customer\": ");

    let err = ws.run(StubBackend::pages(1)).unwrap_err();
    assert!(matches!(err, PipelineError::Source(SourceError::Parse { .. })));
}

#[test]
fn test_data_source_can_replace_the_data_file() -> TestResult {
    let ws = Workspace::new(pagination_template(), &full_statement());
    fs::remove_file(ws.path("data/statement.json"))?;

    let report = PipelineBuilder::new()
        .with_config(ws.config())
        .with_data_source(InMemorySource::new(statement_without_default_page_count()))
        .with_backend(StubBackend::failing())
        .build()
        .run()?;

    assert_eq!(report.pagination.context.page_count, None);
    Ok(())
}

#[test]
fn test_missing_template_is_fatal() {
    let ws = Workspace::new(statement_template(), &full_statement());
    fs::remove_file(ws.path("templates/statement.html")).unwrap();

    let err = ws.run(StubBackend::pages(1)).unwrap_err();
    assert!(matches!(err, PipelineError::Template(_)));
}

#[test]
fn test_renderer_exhaustion_is_fatal_only_for_the_artifact() {
    let ws = Workspace::new(statement_template(), &full_statement());
    let renderer = ExternalRenderer::with_candidates(
        vec![
            CommandCandidate::new("folio-test-missing-primary", Vec::new()),
            CommandCandidate::new("folio-test-missing-fallback", vec!["-m".into()]),
        ],
        Some(Duration::from_secs(5)),
    );

    let err = PipelineBuilder::new()
        .with_config(ws.config())
        .with_backend(renderer)
        .with_pdf(true)
        .build()
        .run()
        .unwrap_err();

    // The probe degraded, so the document itself was still written.
    assert!(ws.path("dist/statement.html").exists());
    match &err {
        PipelineError::Gateway(GatewayError::Exhausted { attempts, .. }) => {
            assert_eq!(attempts.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("folio-test-missing-primary"));
    assert!(message.contains("folio-test-missing-fallback -m"));
}
