/*
 * Copyright (c) The yuv-extract Authors. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use yuv_extract::{extract, extract_into, PlaneBuffer, SourceImage, YuvPlanarImageMut};

const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;
// Typical 64 byte row alignment of camera buffers.
const ROW_STRIDE: usize = 1984;

fn random_plane(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random::<u8>()).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let y_plane = random_plane(ROW_STRIDE * HEIGHT);
    let u_plane = random_plane(ROW_STRIDE / 2 * HEIGHT / 2);
    let v_plane = random_plane(ROW_STRIDE / 2 * HEIGHT / 2);
    // Interleaved chroma, the V view starts one byte after U.
    let uv_plane = random_plane(ROW_STRIDE * HEIGHT / 2 + 1);

    let planar_planes = [
        PlaneBuffer::new(&y_plane, ROW_STRIDE as u32, 1),
        PlaneBuffer::new(&u_plane, ROW_STRIDE as u32 / 2, 1),
        PlaneBuffer::new(&v_plane, ROW_STRIDE as u32 / 2, 1),
    ];
    let planar_image = SourceImage::new(&planar_planes, WIDTH as u32, HEIGHT as u32);

    let semi_planar_planes = [
        PlaneBuffer::new(&y_plane, ROW_STRIDE as u32, 1),
        PlaneBuffer::new(&uv_plane[..uv_plane.len() - 1], ROW_STRIDE as u32, 2),
        PlaneBuffer::new(&uv_plane[1..], ROW_STRIDE as u32, 2),
    ];
    let semi_planar_image = SourceImage::new(&semi_planar_planes, WIDTH as u32, HEIGHT as u32);

    c.bench_function("yuv-extract: Planar 1080p", |b| {
        b.iter(|| {
            extract(&planar_image).unwrap();
        })
    });

    c.bench_function("yuv-extract: Semi-planar 1080p", |b| {
        b.iter(|| {
            extract(&semi_planar_image).unwrap();
        })
    });

    c.bench_function("yuv-extract: Semi-planar 1080p into reused target", |b| {
        let mut target = YuvPlanarImageMut::<u8>::alloc(WIDTH as u32, HEIGHT as u32);
        b.iter(|| {
            extract_into(&semi_planar_image, &mut target).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
