use criterion::{black_box, criterion_group, criterion_main, Criterion};
use peloton_core::{svg, Dataset, Layout, PlotRenderer, RaceTime, Record, RenderOptions, Rgba, Scales, Scene};

fn build_dataset(n: usize) -> Dataset {
    let records = (0..n)
        .map(|i| {
            let year = 1900 + (i % 120) as i32;
            let time = RaceTime::from_seconds(2200 + ((i * 37) % 400) as u32);
            let doping = if i % 3 == 0 { "alleged" } else { "" };
            Record::new(year, time, doping)
        })
        .collect();
    Dataset::new(records)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_scene");
    let layout = Layout::default();
    let opts = RenderOptions::default();
    for &n in &[35usize, 1_000, 10_000] {
        let ds = build_dataset(n);
        let scales = Scales::for_dataset(&ds, &layout).expect("non-empty");
        group.bench_function(format!("scene_{n}"), |b| {
            let mut scene = Scene::new(0.0, 0.0, Rgba::rgb(0, 0, 0));
            b.iter(|| {
                PlotRenderer::new(&opts).render(&mut scene, black_box(&ds), &scales, &layout);
                black_box(scene.nodes().len());
            });
        });
        group.bench_function(format!("svg_{n}"), |b| {
            let mut scene = Scene::new(0.0, 0.0, Rgba::rgb(0, 0, 0));
            PlotRenderer::new(&opts).render(&mut scene, &ds, &scales, &layout);
            b.iter(|| black_box(svg::to_svg(&scene)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
