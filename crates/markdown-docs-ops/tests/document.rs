use std::fs;

use markdown_docs_ops::{parse_slug, render_document, DocumentError, Operations};
use markdown_docs_render::MarkdownRenderer;
use markdown_docs_test_support::{sample_docs, DocsFixture};

#[test]
fn renders_existing_document_to_html() {
    let fixture = sample_docs();
    let document = render_document(
        &fixture.root(),
        "md",
        &["dart", "data-types"],
        &MarkdownRenderer::new(),
    )
    .expect("render data-types");

    assert!(!document.html.is_empty());
    assert!(document.html.contains("<h1>Data Types</h1>"));
    assert!(!document.html.contains("# Data Types"));
    assert_eq!(document.title.as_deref(), Some("Data Types"));
    assert_eq!(
        document.source_path,
        fixture.root().join("dart").join("data-types.md")
    );
}

#[test]
fn nested_slug_resolves_nested_file() {
    let fixture = sample_docs();
    let ops = Operations::new(fixture.config());

    let slug = parse_slug("dart/sub/topic").expect("slug");
    let document = ops.render(&slug).expect("render nested topic");

    assert!(document.html.contains("<h2>Details</h2>"));
    assert!(document.html.contains("<li>one</li>"));
    assert_eq!(document.display_title(), "Nested Topic");
}

#[test]
fn missing_document_is_not_found() {
    let fixture = sample_docs();
    let ops = Operations::new(fixture.config());

    let err = ops.render(&["dart", "nope"]).expect_err("missing");
    assert!(err.is_missing());
    assert!(matches!(err, DocumentError::NotFound { .. }));
}

#[test]
fn category_directory_is_not_a_document() {
    let fixture = sample_docs();
    fixture.mkdir("dart/folder.md");
    let ops = Operations::new(fixture.config());

    let err = ops.render(&["dart", "folder"]).expect_err("directory");
    assert!(err.is_missing());
}

#[test]
fn traversal_outside_root_is_refused() {
    let fixture = sample_docs();
    fixture.write_workspace_file("secret.md", "# Secret\n");
    let ops = Operations::new(fixture.config());

    let err = ops.render(&["..", "secret"]).expect_err("traversal");
    assert!(matches!(err, DocumentError::InvalidSlug(_)));
}

#[test]
fn invalid_utf8_content_surfaces_as_io_error() {
    let fixture = sample_docs();
    fs::write(fixture.root().join("dart/binary.md"), [0xff, 0xfe, 0x00]).expect("write");
    let ops = Operations::new(fixture.config());

    let err = ops.render(&["dart", "binary"]).expect_err("invalid utf-8");
    assert!(matches!(err, DocumentError::Io { .. }));
    assert!(!err.is_missing());
}

#[test]
fn document_page_wraps_rendered_html() {
    let fixture = sample_docs();
    let ops = Operations::new(fixture.config());

    let page = ops
        .document_page(&["rust", "ownership_and_borrowing"])
        .expect("page");
    assert!(page.contains("<title>Ownership | Documentation Hub</title>"));
    assert!(page.contains("<table>"));
}

#[test]
fn index_page_lists_catalog() {
    let fixture = sample_docs();
    let ops = Operations::new(fixture.config());

    let page = ops.index_page();
    assert!(page.contains("Dart Tutorial"));
    assert!(page.contains("Go Tutorial"));
    assert!(page.contains("href=\"/docs/rust/ownership_and_borrowing\""));
    assert!(page.contains(">Ownership And Borrowing</a>"));
}

#[test]
fn empty_root_renders_placeholder() {
    let fixture = DocsFixture::new();
    let ops = Operations::new(fixture.config());
    assert!(ops.index_page().contains("No documentation found"));
}
