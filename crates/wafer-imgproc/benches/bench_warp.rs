use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use wafer_image::Image;
use wafer_imgproc::warp::{
    compose_affine, get_rotation_matrix2d, get_translation_matrix2d, warp_affine,
};

fn bench_warp_affine(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpAffine");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![128u8; width * height * 3]).unwrap();
        let output = Image::<u8, 3>::from_size_val(image_size, 0).unwrap();

        let rotation = get_rotation_matrix2d(image_size.center(), 45.0, 0.9);
        let translation = get_translation_matrix2d(5.0, -7.0);

        group.bench_with_input(
            BenchmarkId::new("two_pass", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut tmp, mut dst) = (i.0.clone(), i.1.clone(), i.1.clone());
                b.iter(|| {
                    warp_affine(
                        black_box(&src),
                        black_box(&mut tmp),
                        black_box(&rotation),
                        [0; 3],
                    )
                    .unwrap();
                    warp_affine(
                        black_box(&tmp),
                        black_box(&mut dst),
                        black_box(&translation),
                        [0; 3],
                    )
                })
            },
        );

        let fused = compose_affine(&rotation, &translation);
        group.bench_with_input(
            BenchmarkId::new("fused", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0.clone(), i.1.clone());
                b.iter(|| {
                    warp_affine(
                        black_box(&src),
                        black_box(&mut dst),
                        black_box(&fused),
                        [0; 3],
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_affine);
criterion_main!(benches);
