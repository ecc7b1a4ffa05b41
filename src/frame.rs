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
use crate::images::{BufferStoreMut, YuvPlanarImage, YuvPlanarImageMut};

/// Tightly packed YUV 4:2:0 planes produced by [crate::extract].
///
/// `y` holds `width * height` samples, `u` and `v` hold `width * height / 4`
/// samples each, all in row-major order without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFrame {
    pub y: Vec<u8>,
    pub u: Vec<u8>,
    pub v: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExtractedFrame {
    /// Dimensions must be already validated as even.
    pub(crate) fn alloc(width: u32, height: u32) -> Self {
        let luma_size = width as usize * height as usize;
        ExtractedFrame {
            y: vec![0u8; luma_size],
            u: vec![0u8; luma_size / 4],
            v: vec![0u8; luma_size / 4],
            width,
            height,
        }
    }

    pub(crate) fn as_planar_image_mut(&mut self) -> YuvPlanarImageMut<'_, u8> {
        YuvPlanarImageMut {
            y_plane: BufferStoreMut::Borrowed(&mut self.y),
            y_stride: self.width,
            u_plane: BufferStoreMut::Borrowed(&mut self.u),
            u_stride: self.width / 2,
            v_plane: BufferStoreMut::Borrowed(&mut self.v),
            v_stride: self.width / 2,
            width: self.width,
            height: self.height,
        }
    }

    /// Planar view of the frame with strides equal to the plane widths.
    pub fn as_planar_image(&self) -> YuvPlanarImage<'_, u8> {
        YuvPlanarImage {
            y_plane: &self.y,
            y_stride: self.width,
            u_plane: &self.u,
            u_stride: self.width / 2,
            v_plane: &self.v,
            v_stride: self.width / 2,
            width: self.width,
            height: self.height,
        }
    }

    /// Packs the frame as I420: Y, then U, then V in one buffer.
    pub fn to_i420(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(self.y.len() + self.u.len() + self.v.len());
        packed.extend_from_slice(&self.y);
        packed.extend_from_slice(&self.u);
        packed.extend_from_slice(&self.v);
        packed
    }

    /// Packs the frame as NV12: Y, then interleaved U/V pairs.
    pub fn to_nv12(&self) -> Vec<u8> {
        self.to_semi_planar(&self.u, &self.v)
    }

    /// Packs the frame as NV21: Y, then interleaved V/U pairs.
    pub fn to_nv21(&self) -> Vec<u8> {
        self.to_semi_planar(&self.v, &self.u)
    }

    fn to_semi_planar(&self, first: &[u8], second: &[u8]) -> Vec<u8> {
        let mut packed = Vec::with_capacity(self.y.len() + first.len() + second.len());
        packed.extend_from_slice(&self.y);
        for (&c0, &c1) in first.iter().zip(second.iter()) {
            packed.push(c0);
            packed.push(c1);
        }
        packed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> ExtractedFrame {
        ExtractedFrame {
            y: (0u8..16).collect(),
            u: vec![100, 101, 102, 103],
            v: vec![200, 201, 202, 203],
            width: 4,
            height: 4,
        }
    }

    #[test]
    fn test_alloc_sizes() {
        let frame = ExtractedFrame::alloc(640, 480);
        assert_eq!(frame.y.len(), 640 * 480);
        assert_eq!(frame.u.len(), 320 * 240);
        assert_eq!(frame.v.len(), 320 * 240);
        assert!(frame.y.iter().all(|&x| x == 0));
    }

    #[test]
    fn test_i420_layout() {
        let frame = sample_frame();
        let packed = frame.to_i420();
        assert_eq!(packed.len(), 16 * 3 / 2);
        assert_eq!(&packed[..16], frame.y.as_slice());
        assert_eq!(&packed[16..20], &[100, 101, 102, 103]);
        assert_eq!(&packed[20..], &[200, 201, 202, 203]);
    }

    #[test]
    fn test_semi_planar_layouts() {
        let frame = sample_frame();
        let nv12 = frame.to_nv12();
        let nv21 = frame.to_nv21();
        assert_eq!(nv12.len(), 24);
        assert_eq!(&nv12[16..], &[100, 200, 101, 201, 102, 202, 103, 203]);
        assert_eq!(&nv21[16..], &[200, 100, 201, 101, 202, 102, 203, 103]);
        assert_eq!(&nv12[..16], &nv21[..16]);
    }

    #[test]
    fn test_planar_view_strides() {
        let frame = sample_frame();
        let view = frame.as_planar_image();
        assert_eq!(view.y_stride, 4);
        assert_eq!(view.u_stride, 2);
        assert_eq!(view.v_stride, 2);
        assert_eq!(view.u_plane, frame.u.as_slice());
    }

    #[test]
    fn test_mutable_view_passes_constraints() {
        let mut frame = ExtractedFrame::alloc(8, 6);
        let planar_image = frame.as_planar_image_mut();
        assert!(planar_image.check_constraints().is_ok());
    }
}
