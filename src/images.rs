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
use crate::yuv_error::{
    check_chroma_source, check_destination_plane, check_luma_source, check_plane_count,
    check_yuv420_dimensions,
};
use crate::yuv_support::{ChromaLayout, YuvPlane};
use crate::InvalidImageError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn as_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

/// One plane of an image as delivered by a capture pipeline.
///
/// Strides are in bytes. `pixel_stride` is only meaningful for chroma planes,
/// luma rows are always read as contiguous bytes.
#[derive(Debug, Copy, Clone)]
pub struct PlaneBuffer<'a> {
    pub data: &'a [u8],
    pub row_stride: u32,
    pub pixel_stride: u32,
}

impl<'a> PlaneBuffer<'a> {
    pub fn new(data: &'a [u8], row_stride: u32, pixel_stride: u32) -> Self {
        PlaneBuffer {
            data,
            row_stride,
            pixel_stride,
        }
    }
}

/// Borrowed multi-plane YUV 4:2:0 image, planes ordered Y, U, V.
///
/// The image only lives for one conversion call, releasing the underlying
/// hardware buffer afterwards is up to whoever produced it.
#[derive(Debug, Copy, Clone)]
pub struct SourceImage<'a> {
    pub planes: &'a [PlaneBuffer<'a>],
    pub width: u32,
    pub height: u32,
}

impl<'a> SourceImage<'a> {
    pub fn new(planes: &'a [PlaneBuffer<'a>], width: u32, height: u32) -> Self {
        SourceImage {
            planes,
            width,
            height,
        }
    }

    #[inline]
    pub fn plane(&self, plane: YuvPlane) -> Option<&PlaneBuffer<'a>> {
        self.planes.get(plane.index())
    }

    /// Validates geometry of every plane and reports how U and V are laid out.
    pub fn check_constraints(&self) -> Result<(ChromaLayout, ChromaLayout), InvalidImageError> {
        check_yuv420_dimensions(self.width, self.height)?;
        check_plane_count(self.planes.len())?;
        let y_plane = &self.planes[YuvPlane::Y.index()];
        check_luma_source(y_plane.data, y_plane.row_stride, self.width, self.height)?;
        let u_plane = &self.planes[YuvPlane::U.index()];
        let u_layout = check_chroma_source(
            YuvPlane::U,
            u_plane.data,
            u_plane.row_stride,
            u_plane.pixel_stride,
            self.width,
            self.height,
        )?;
        let v_plane = &self.planes[YuvPlane::V.index()];
        let v_layout = check_chroma_source(
            YuvPlane::V,
            v_plane.data,
            v_plane.row_stride,
            v_plane.pixel_stride,
            self.width,
            self.height,
        )?;
        Ok((u_layout, v_layout))
    }
}

#[derive(Debug, Clone)]
/// Non-mutable representation of Planar YUV image
pub struct YuvPlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub y_stride: u32,
    pub u_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub u_stride: u32,
    pub v_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
/// Mutable representation of Planar YUV 4:2:0 image
pub struct YuvPlanarImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub y_stride: u32,
    pub u_plane: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub u_stride: u32,
    pub v_plane: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvPlanarImageMut<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), InvalidImageError> {
        check_yuv420_dimensions(self.width, self.height)?;
        let chroma_width = self.width as usize / 2;
        let chroma_height = self.height as usize / 2;
        check_destination_plane(
            YuvPlane::Y,
            self.y_plane.borrow(),
            self.y_stride,
            self.width as usize,
            self.height as usize,
        )?;
        check_destination_plane(
            YuvPlane::U,
            self.u_plane.borrow(),
            self.u_stride,
            chroma_width,
            chroma_height,
        )?;
        check_destination_plane(
            YuvPlane::V,
            self.v_plane.borrow(),
            self.v_stride,
            chroma_width,
            chroma_height,
        )?;
        Ok(())
    }

    /// Read-only view of the planes, e.g. to hand a frame filled by
    /// [crate::extract_into] to code that only reads it.
    pub fn to_fixed(&self) -> YuvPlanarImage<'_, T> {
        YuvPlanarImage {
            y_plane: self.y_plane.borrow(),
            y_stride: self.y_stride,
            u_plane: self.u_plane.borrow(),
            u_stride: self.u_stride,
            v_plane: self.v_plane.borrow(),
            v_stride: self.v_stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> YuvPlanarImageMut<'_, T>
where
    T: Default + Clone + Copy + Debug,
{
    /// Allocates tightly packed mutable target 4:2:0 image
    pub fn alloc(width: u32, height: u32) -> Self {
        let chroma_width = (width as usize).div_ceil(2);
        let chroma_height = (height as usize).div_ceil(2);
        let y_target = vec![T::default(); width as usize * height as usize];
        let u_target = vec![T::default(); chroma_width * chroma_height];
        let v_target = vec![T::default(); chroma_width * chroma_height];
        Self {
            y_plane: BufferStoreMut::Owned(y_target),
            y_stride: width,
            u_plane: BufferStoreMut::Owned(u_target),
            u_stride: chroma_width as u32,
            v_plane: BufferStoreMut::Owned(v_target),
            v_stride: chroma_width as u32,
            width,
            height,
        }
    }
}
