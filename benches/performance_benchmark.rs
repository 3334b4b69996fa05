use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazy_gallery::domain::image::{generate_image_urls, UrlTemplate};
use lazy_gallery::domain::slot::SlotId;
use lazy_gallery::services::{IntersectionNotification, IntersectionWatcher, LazyLoader};

struct NoopWatcher;

impl IntersectionWatcher for NoopWatcher {
    type Handle = usize;

    fn observe(&mut self, _slot: SlotId, _handle: &usize) {}

    fn unobserve(&mut self, _slot: SlotId, _handle: &usize) {}

    fn disconnect(&mut self) {}
}

fn benchmark_url_generation(c: &mut Criterion) {
    let template = UrlTemplate::default();
    let mut group = c.benchmark_group("url_generation");

    for count in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| generate_image_urls(black_box(count), &template));
        });
    }

    group.finish();
}

fn benchmark_notification_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_batches");

    for count in [100, 1_000, 10_000] {
        let urls = generate_image_urls(count, &UrlTemplate::default());
        let batch: Vec<_> = (0..count)
            .map(|index| IntersectionNotification::entering(SlotId(index)))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut loader = LazyLoader::new("placeholder");
                let generation = loader.activate(&urls, NoopWatcher);
                for index in 0..count {
                    loader.attach(generation, SlotId(index), index);
                }
                black_box(loader.handle_notifications(generation, batch.iter().copied()))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_url_generation, benchmark_notification_batches);
criterion_main!(benches);
