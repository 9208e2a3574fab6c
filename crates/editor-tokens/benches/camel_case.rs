use criterion::{Criterion, black_box, criterion_group, criterion_main};
use editor_tokens::{next_camel_case_position, previous_camel_case_position};
use editor_tokens_simple::SimpleLexer;

fn large_source(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "let parseHTTPResponseBody{i} = readIncomingStream(socketHandle);\n"
        ));
    }
    out
}

fn bench_walk_forward(c: &mut Criterion) {
    let hierarchy = SimpleLexer::c_like()
        .unwrap()
        .hierarchy(&large_source(2_000))
        .unwrap();
    let end = hierarchy.len();
    c.bench_function("camel_case/walk_forward_2k_lines", |b| {
        b.iter(|| {
            let mut offset = 0;
            let mut stops = 0usize;
            while offset < end {
                offset = next_camel_case_position(hierarchy.sequence_at(offset), offset);
                stops += 1;
            }
            black_box(stops);
        })
    });
}

fn bench_walk_backward(c: &mut Criterion) {
    let hierarchy = SimpleLexer::c_like()
        .unwrap()
        .hierarchy(&large_source(2_000))
        .unwrap();
    let end = hierarchy.len();
    c.bench_function("camel_case/walk_backward_2k_lines", |b| {
        b.iter(|| {
            let mut offset = end;
            let mut stops = 0usize;
            while offset > 0 {
                offset = previous_camel_case_position(hierarchy.sequence_at_backward(offset), offset);
                stops += 1;
            }
            black_box(stops);
        })
    });
}

criterion_group!(benches, bench_walk_forward, bench_walk_backward);
criterion_main!(benches);
