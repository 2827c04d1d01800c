use basalt_util::parse_line;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const HIT: &str =
    r#"199.72.81.55 - - [01/Jul/1995:00:00:01 -0400] "GET /history/apollo/ HTTP/1.0" 200 6245"#;
const DASH: &str = r#"burger.letters.com - - [01/Jul/1995:00:00:12 -0400] "POST /login HTTP/1.0" 401 -"#;
const MISS: &str = r#"alyssa.p - - [01/Jul/1995:00:00:12 -0400] not even close"#;

fn bench_clf_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("clf_parse");
    group.throughput(Throughput::Elements(1));

    group.bench_with_input(BenchmarkId::new("full_line", "get"), &HIT, |b, line| {
        b.iter(|| {
            let record = parse_line(black_box(line)).expect("line parses");
            black_box(record.host.len() + record.request.len())
        });
    });

    group.bench_with_input(BenchmarkId::new("dash_fields", "post"), &DASH, |b, line| {
        b.iter(|| {
            let record = parse_line(black_box(line)).expect("line parses");
            black_box(record.status as usize + record.size as usize)
        });
    });

    group.bench_with_input(BenchmarkId::new("reject", "garbage"), &MISS, |b, line| {
        b.iter(|| black_box(parse_line(black_box(line)).is_err()));
    });

    group.finish();
}

criterion_group!(benches, bench_clf_parse);
criterion_main!(benches);
