use bookmark_parser::db::{BookmarkDb, StatusFilter};
use bookmark_parser::import_export::{
    export_bookmarks, import_bookmarks, parse_str, DuplicateScope, HtmlExporter,
};
use bookmark_parser::models::Bookmark;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

fn sample_document(folders: usize, per_folder: usize) -> String {
    let mut html = String::from("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n<DL><p>\n");
    for f in 0..folders {
        html.push_str(&format!("    <DT><H3>Folder {}</H3>\n    <DL><p>\n", f));
        for i in 0..per_folder {
            html.push_str(&format!(
                "        <DT><A HREF=\"https://example.com/{}/{}\" ADD_DATE=\"0\">Title {} {}</A>\n",
                f, i, f, i
            ));
        }
        html.push_str("    </DL><p>\n");
    }
    html.push_str("</DL><p>\n");
    html
}

fn sample_records(count: usize) -> Vec<Bookmark> {
    (0..count)
        .map(|i| {
            Bookmark::new(
                format!("Title {}", i),
                format!("https://example.com/{}", i),
                format!("Folder {}", i % 10),
            )
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let html = sample_document(20, 50);

    group.bench_function("parse_str (1000 links)", |b| {
        b.iter(|| parse_str(black_box(&html)).unwrap());
    });

    group.finish();
}

fn bench_db_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("db_operations");
    let records = sample_records(500);

    group.bench_function("import_bookmarks (500)", |b| {
        b.iter_with_setup(
            || BookmarkDb::init_in_memory().unwrap(),
            |db| import_bookmarks(&db, &records, DuplicateScope::StoreOnly).unwrap(),
        );
    });

    group.bench_function("search (substring)", |b| {
        let db = BookmarkDb::init_in_memory().unwrap();
        import_bookmarks(&db, &records, DuplicateScope::StoreOnly).unwrap();
        b.iter(|| db.search(black_box("Title 4")).unwrap());
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let records = sample_records(1000);

    group.bench_function("write_to (1000 records)", |b| {
        let exporter = HtmlExporter::default();
        b.iter(|| {
            let mut buf = Vec::with_capacity(128 * 1024);
            exporter.write_to(black_box(&records), &mut buf).unwrap();
            buf
        });
    });

    group.bench_function("export_bookmarks to file", |b| {
        let db = BookmarkDb::init_in_memory().unwrap();
        import_bookmarks(&db, &records, DuplicateScope::StoreOnly).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.html");
        b.iter(|| export_bookmarks(&db, StatusFilter::Valid, &path).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_db_ops, bench_export);
criterion_main!(benches);
