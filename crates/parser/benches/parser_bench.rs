use criterion::{Criterion, criterion_group, criterion_main};
use hal_parser::parse;
use std::hint::black_box;

const BRANCHY: &str = r#"
function integer classify(integer n)
begin
    integer k;
    k = 0;
top:
    if n > 100 then
    begin
        n = n / 2;
        k = k + 1;
        goto top;
    end
    switch n
    case 0, 1: classify = k;
    case 2: classify = k + 1;
    otherwise classify = -1;
    end;
end;
"#;

/// `count` procedures, each calling the previous one.
fn chained_source(count: usize) -> String {
    let mut source = String::from("procedure p0(integer a) begin a = a + 1; end;\n");
    for i in 1..count {
        source.push_str(&format!(
            "procedure p{i}(integer a)\nbegin\n    integer b;\n    b = a * 2 + {i};\n    while b > 0 b = b - 1;\n    p{prev}(b);\nend;\n",
            i = i,
            prev = i - 1
        ));
    }
    source
}

fn bench_parser_function(c: &mut Criterion) {
    c.bench_function("parser_branchy_function", |b| {
        b.iter(|| black_box(parse(black_box(BRANCHY))));
    });
}

fn bench_parser_large_file(c: &mut Criterion) {
    let source = chained_source(500);
    c.bench_function("parser_large_file", |b| {
        b.iter(|| black_box(parse(black_box(&source))));
    });
}

criterion_group!(benches, bench_parser_function, bench_parser_large_file);
criterion_main!(benches);
