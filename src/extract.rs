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
use crate::frame::ExtractedFrame;
use crate::images::{SourceImage, YuvPlanarImageMut};
use crate::yuv_support::{ChromaLayout, YuvPlane};
use crate::InvalidImageError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Copies `width` bytes from the start of every source row, dropping row padding.
fn copy_luma_plane(src: &[u8], src_stride: usize, dst: &mut [u8], dst_stride: usize, width: usize) {
    let src_iter;
    let dst_iter;
    #[cfg(feature = "rayon")]
    {
        src_iter = src.par_chunks(src_stride);
        dst_iter = dst.par_chunks_exact_mut(dst_stride);
    }
    #[cfg(not(feature = "rayon"))]
    {
        src_iter = src.chunks(src_stride);
        dst_iter = dst.chunks_exact_mut(dst_stride);
    }
    src_iter.zip(dst_iter).for_each(|(src_row, dst_row)| {
        dst_row[..width].copy_from_slice(&src_row[..width]);
    });
}

fn deinterleave_chroma_impl<const LAYOUT: u8>(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    chroma_width: usize,
) {
    let layout: ChromaLayout = LAYOUT.into();
    let pixel_stride = layout.pixel_stride();

    let src_iter;
    let dst_iter;
    #[cfg(feature = "rayon")]
    {
        src_iter = src.par_chunks(src_stride);
        dst_iter = dst.par_chunks_exact_mut(dst_stride);
    }
    #[cfg(not(feature = "rayon"))]
    {
        src_iter = src.chunks(src_stride);
        dst_iter = dst.chunks_exact_mut(dst_stride);
    }
    src_iter.zip(dst_iter).for_each(|(src_row, dst_row)| {
        let dst_row = &mut dst_row[..chroma_width];
        match layout {
            ChromaLayout::Planar => {
                dst_row.copy_from_slice(&src_row[..chroma_width]);
            }
            ChromaLayout::SemiPlanar => {
                for (dst, &src) in dst_row.iter_mut().zip(src_row.iter().step_by(pixel_stride)) {
                    *dst = src;
                }
            }
        }
    });
}

/// Gathers one chroma sample every `pixel_stride` bytes of each source row into
/// a packed `width / 2` wide plane.
fn deinterleave_chroma_plane(
    layout: ChromaLayout,
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    chroma_width: usize,
) {
    match layout {
        ChromaLayout::Planar => deinterleave_chroma_impl::<{ ChromaLayout::Planar as u8 }>(
            src,
            src_stride,
            dst,
            dst_stride,
            chroma_width,
        ),
        ChromaLayout::SemiPlanar => deinterleave_chroma_impl::<
            { ChromaLayout::SemiPlanar as u8 },
        >(src, src_stride, dst, dst_stride, chroma_width),
    }
}

/// Both `image` and `planar_image` must already be validated.
fn extract_planes(
    image: &SourceImage,
    u_layout: ChromaLayout,
    v_layout: ChromaLayout,
    planar_image: &mut YuvPlanarImageMut<u8>,
) {
    let chroma_width = image.width as usize / 2;

    let y_src = &image.planes[YuvPlane::Y.index()];
    let u_src = &image.planes[YuvPlane::U.index()];
    let v_src = &image.planes[YuvPlane::V.index()];

    let y_stride = planar_image.y_stride as usize;
    let u_stride = planar_image.u_stride as usize;
    let v_stride = planar_image.v_stride as usize;

    copy_luma_plane(
        y_src.data,
        y_src.row_stride as usize,
        planar_image.y_plane.as_mut(),
        y_stride,
        image.width as usize,
    );
    deinterleave_chroma_plane(
        u_layout,
        u_src.data,
        u_src.row_stride as usize,
        planar_image.u_plane.as_mut(),
        u_stride,
        chroma_width,
    );
    deinterleave_chroma_plane(
        v_layout,
        v_src.data,
        v_src.row_stride as usize,
        planar_image.v_plane.as_mut(),
        v_stride,
        chroma_width,
    );
}

/// Converts a hardware YUV 4:2:0 image into caller owned planar storage.
///
/// Destination planes may be strided; bytes past `width` (or `width / 2` for
/// chroma) in each destination row are left as they were. Nothing is written
/// unless both images pass validation.
///
/// # Arguments
///
/// * `image` - Source image with exactly three planes ordered Y, U, V.
/// * `planar_image` - Target planar image, must have the same dimensions as `image`.
///
/// # Errors
///
/// Returns [InvalidImageError] if the source dimensions are not positive and even,
/// if there are not exactly three planes, if any plane is shorter than
/// `row_stride * rows`, if a chroma pixel stride is not 1 or 2, or if the
/// destination doesn't match the source.
pub fn extract_into(
    image: &SourceImage,
    planar_image: &mut YuvPlanarImageMut<u8>,
) -> Result<(), InvalidImageError> {
    let (u_layout, v_layout) = image.check_constraints()?;
    if planar_image.width != image.width || planar_image.height != image.height {
        return Err(InvalidImageError::DestinationDimensionsMismatch {
            expected: (image.width, image.height),
            received: (planar_image.width, planar_image.height),
        });
    }
    planar_image.check_constraints()?;

    extract_planes(image, u_layout, v_layout, planar_image);

    Ok(())
}

/// Converts a hardware YUV 4:2:0 image into three tightly packed Y, U, V buffers.
///
/// Row padding is stripped and interleaved chroma is split apart. No color
/// conversion is performed.
///
/// # Errors
///
/// See [extract_into]. Nothing is allocated for the output when validation fails.
pub fn extract(image: &SourceImage) -> Result<ExtractedFrame, InvalidImageError> {
    let (u_layout, v_layout) = image.check_constraints()?;

    let mut frame = ExtractedFrame::alloc(image.width, image.height);
    {
        let mut planar_image = frame.as_planar_image_mut();
        extract_planes(image, u_layout, v_layout, &mut planar_image);
    }

    Ok(frame)
}
