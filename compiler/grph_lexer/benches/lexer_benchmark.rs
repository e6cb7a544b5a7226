use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use grph_lexer::{tokenize_document, Lexer, LexerConfig};

fn generate_large_script() -> String {
    let mut content = String::new();

    for i in 0..2_000 {
        content.push_str(&format!(
            r#"/// Shape number {i}
#function void draw{i}[pos origin = {x},{y}]
	Rectangle box{i} = Rectangle(origin {w},{w} color.red)
	box{i}.rotation = {i}°
	::again #while [box{i}.rotation ≠ 0]
		box{i}:rotate[-1f]
		log["step \"{i}\"\n" 'log{i}.txt'] // trace
"#,
            x = i % 640,
            y = i % 480,
            w = 10 + i % 50,
        ));
    }

    content
}

fn bench_sequential(c: &mut Criterion) {
    let source = generate_large_script();

    c.benchmark_group("lexer")
        .throughput(Throughput::Bytes(source.len() as u64))
        .bench_function("sequential", |b| b.iter(|| tokenize_document(&source)));
}

fn bench_parallel(c: &mut Criterion) {
    let source = generate_large_script();
    let lexer = Lexer::new(LexerConfig::default());

    c.benchmark_group("lexer")
        .throughput(Throughput::Bytes(source.len() as u64))
        .bench_function("parallel", |b| b.iter(|| lexer.tokenize_document(&source)));
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(10));
    targets = bench_sequential, bench_parallel
);

criterion_main!(benches);
