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
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yuv_extract::{extract, PlaneBuffer, SourceImage};

#[derive(Arbitrary, Debug)]
struct PlaneGeometry {
    row_padding: u8,
    pixel_stride: u8,
    truncate: u8,
}

#[derive(Arbitrary, Debug)]
struct ExtractInput {
    width: u8,
    height: u8,
    plane_count: u8,
    seed: u8,
    planes: [PlaneGeometry; 3],
}

/// Byte stored at `offset` of plane `index`. Neighbouring bytes and the three
/// planes differ, so a wrong offset or swapped planes shows up in the output.
#[inline]
fn pattern(seed: u8, index: usize, offset: usize) -> u8 {
    let mixed = offset.wrapping_mul(31) ^ (offset >> 8).wrapping_mul(7);
    (mixed as u8)
        .wrapping_add(seed)
        .wrapping_add((index as u8).wrapping_mul(85))
}

fn plane_bytes(
    geometry: &PlaneGeometry,
    index: usize,
    row_width: usize,
    rows: usize,
    seed: u8,
) -> (Vec<u8>, u32) {
    let pixel_stride = geometry.pixel_stride.max(1) as usize;
    let row_stride = row_width * pixel_stride + geometry.row_padding as usize;
    let len = (row_stride * rows).saturating_sub(geometry.truncate as usize);
    let data = (0..len).map(|offset| pattern(seed, index, offset)).collect();
    (data, row_stride as u32)
}

fuzz_target!(|input: ExtractInput| {
    let width = input.width as usize;
    let height = input.height as usize;
    let chroma_width = width / 2;

    let y = plane_bytes(&input.planes[0], 0, width, height, input.seed);
    let u = plane_bytes(&input.planes[1], 1, chroma_width, height / 2, input.seed);
    let v = plane_bytes(&input.planes[2], 2, chroma_width, height / 2, input.seed);

    let planes = [
        PlaneBuffer::new(&y.0, y.1, input.planes[0].pixel_stride as u32),
        PlaneBuffer::new(&u.0, u.1, input.planes[1].pixel_stride as u32),
        PlaneBuffer::new(&v.0, v.1, input.planes[2].pixel_stride as u32),
    ];
    let plane_count = (input.plane_count as usize % 4).min(planes.len());
    let image = SourceImage::new(&planes[..plane_count], width as u32, height as u32);

    let Ok(frame) = extract(&image) else {
        return;
    };

    assert_eq!(frame.y.len(), width * height);
    assert_eq!(frame.u.len(), width * height / 4);
    assert_eq!(frame.v.len(), width * height / 4);

    // Luma ignores its pixel stride.
    for (i, &sample) in frame.y.iter().enumerate() {
        let (row, x) = (i / width, i % width);
        let offset = row * y.1 as usize + x;
        assert_eq!(sample, pattern(input.seed, 0, offset), "Y at {}x{}", x, row);
    }
    for (index, samples, plane) in [(1usize, &frame.u, &planes[1]), (2, &frame.v, &planes[2])] {
        for (i, &sample) in samples.iter().enumerate() {
            let (row, x) = (i / chroma_width, i % chroma_width);
            let offset = row * plane.row_stride as usize + x * plane.pixel_stride as usize;
            assert_eq!(
                sample,
                pattern(input.seed, index, offset),
                "Plane {} at {}x{}",
                index,
                x,
                row
            );
        }
    }
});
