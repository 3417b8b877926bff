// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for layout in the urkunde-document crate.
// Covers the greedy wrapper and full page-flow generation of the longest
// template, a combined education certificate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use urkunde_core::types::{EducationCategory, Template};
use urkunde_document::{AssetBundle, DocumentGenerator, wrap};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Layout never parses the font, so a bare sfnt header is enough here.
fn assets() -> AssetBundle {
    let mut font = vec![0x00, 0x01, 0x00, 0x00];
    font.extend_from_slice(&[0u8; 12]);
    AssetBundle::new(font, None, None).expect("header-only font bundle")
}

fn bench_wrap(c: &mut Criterion) {
    let text = "교육 과정을 성실히 이수하였으며 재범 예방을 위한 실천 계획을 수립하였습니다. ".repeat(20);
    c.bench_function("wrap (40 chars)", |b| {
        b.iter(|| black_box(wrap(black_box(&text), 40)));
    });
}

fn bench_combined_certificate(c: &mut Criterion) {
    let generator = DocumentGenerator::builtin().expect("builtin generator");
    let assets = assets();
    let template =
        Template::CombinedEducation(EducationCategory::SexualOffense, EducationCategory::Drugs);

    c.bench_function("generate combined certificate", |b| {
        b.iter(|| {
            let document = generator
                .generate(black_box(&template), &assets)
                .expect("generation succeeds");
            black_box(document.page_count());
        });
    });
}

criterion_group!(benches, bench_wrap, bench_combined_certificate);
criterion_main!(benches);
