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
use std::fmt::{Display, Formatter};

/// Index of a plane inside a three plane YUV 4:2:0 image.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvPlane {
    Y = 0,
    U = 1,
    V = 2,
}

impl TryFrom<u8> for YuvPlane {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(YuvPlane::Y),
            1 => Ok(YuvPlane::U),
            2 => Ok(YuvPlane::V),
            _ => Err(value),
        }
    }
}

impl YuvPlane {
    /// Position of the plane in [crate::SourceImage::planes].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub(crate) const fn is_chroma(self) -> bool {
        match self {
            YuvPlane::Y => false,
            YuvPlane::U | YuvPlane::V => true,
        }
    }
}

impl Display for YuvPlane {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvPlane::Y => f.write_str("Y"),
            YuvPlane::U => f.write_str("U"),
            YuvPlane::V => f.write_str("V"),
        }
    }
}

/// Arrangement of chroma samples inside a single chroma plane.
///
/// Hardware usually reports this only through the pixel stride: `1` means the
/// plane holds nothing but its own samples, `2` means every other byte belongs
/// to the opposite chroma channel (NV12/NV21 memory seen through two views).
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChromaLayout {
    Planar = 1,
    SemiPlanar = 2,
}

impl TryFrom<u32> for ChromaLayout {
    type Error = u32;

    fn try_from(pixel_stride: u32) -> Result<Self, Self::Error> {
        match pixel_stride {
            1 => Ok(ChromaLayout::Planar),
            2 => Ok(ChromaLayout::SemiPlanar),
            _ => Err(pixel_stride),
        }
    }
}

impl From<u8> for ChromaLayout {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            1 => ChromaLayout::Planar,
            2 => ChromaLayout::SemiPlanar,
            _ => {
                panic!("Unknown value {}", value)
            }
        }
    }
}

impl ChromaLayout {
    #[inline]
    pub const fn pixel_stride(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chroma_layout_from_pixel_stride() {
        assert_eq!(ChromaLayout::try_from(1u32), Ok(ChromaLayout::Planar));
        assert_eq!(ChromaLayout::try_from(2u32), Ok(ChromaLayout::SemiPlanar));
        assert_eq!(ChromaLayout::try_from(0u32), Err(0));
        assert_eq!(ChromaLayout::try_from(3u32), Err(3));
        assert_eq!(ChromaLayout::try_from(4u32), Err(4));
    }

    #[test]
    fn test_chroma_layout_const_round_trip() {
        for layout in [ChromaLayout::Planar, ChromaLayout::SemiPlanar] {
            let restored: ChromaLayout = (layout as u8).into();
            assert_eq!(restored, layout);
            assert_eq!(layout.pixel_stride(), layout as usize);
        }
    }

    #[test]
    fn test_plane_indices() {
        assert_eq!(YuvPlane::Y.index(), 0);
        assert_eq!(YuvPlane::U.index(), 1);
        assert_eq!(YuvPlane::V.index(), 2);
        assert!(!YuvPlane::Y.is_chroma());
        assert!(YuvPlane::U.is_chroma());
        assert!(YuvPlane::V.is_chroma());
    }

    #[test]
    fn test_plane_from_index() {
        for plane in [YuvPlane::Y, YuvPlane::U, YuvPlane::V] {
            assert_eq!(YuvPlane::try_from(plane as u8), Ok(plane));
        }
        assert_eq!(YuvPlane::try_from(3u8), Err(3));
        assert_eq!(YuvPlane::try_from(u8::MAX), Err(u8::MAX));
    }
}
