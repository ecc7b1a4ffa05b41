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
use crate::yuv_support::{ChromaLayout, YuvPlane};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Reasons a hardware image can't be turned into packed Y/U/V planes.
///
/// Every check runs before the first output byte is written, so receiving this
/// error means the destination is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidImageError {
    ZeroBaseSize,
    OddDimensions {
        width: u32,
        height: u32,
    },
    PlaneCountMismatch(MismatchedSize),
    /// Plane data is shorter than `row_stride * rows`.
    PlaneSizeMismatch(YuvPlane, MismatchedSize),
    /// Row stride is smaller than the bytes one row of samples spans.
    RowStrideMismatch(YuvPlane, MismatchedSize),
    UnsupportedPixelStride(YuvPlane, u32),
    DestinationDimensionsMismatch {
        expected: (u32, u32),
        received: (u32, u32),
    },
    DestinationStrideMismatch(YuvPlane, MismatchedSize),
    DestinationSizeMismatch(YuvPlane, MismatchedSize),
    PointerOverflow,
}

impl Display for InvalidImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidImageError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            InvalidImageError::OddDimensions { width, height } => f.write_fmt(format_args!(
                "YUV 4:2:0 requires even dimensions, but image is {}x{}",
                width, height
            )),
            InvalidImageError::PlaneCountMismatch(size) => f.write_fmt(format_args!(
                "Image must have exactly {} planes, but it has {}",
                size.expected, size.received
            )),
            InvalidImageError::PlaneSizeMismatch(plane, size) => f.write_fmt(format_args!(
                "{} plane have invalid size, it must be at least {}, but it was {}",
                plane, size.expected, size.received
            )),
            InvalidImageError::RowStrideMismatch(plane, size) => f.write_fmt(format_args!(
                "{} plane row stride must be at least {}, but it was {}",
                plane, size.expected, size.received
            )),
            InvalidImageError::UnsupportedPixelStride(plane, stride) => f.write_fmt(format_args!(
                "{} plane pixel stride {} is not supported, only 1 and 2 are",
                plane, stride
            )),
            InvalidImageError::DestinationDimensionsMismatch { expected, received } => f
                .write_fmt(format_args!(
                    "Destination dimensions mismatch: expected={}x{}, received={}x{}",
                    expected.0, expected.1, received.0, received.1
                )),
            InvalidImageError::DestinationStrideMismatch(plane, size) => f.write_fmt(format_args!(
                "Destination {} plane stride must be at least {} but it is {}",
                plane, size.expected, size.received
            )),
            InvalidImageError::DestinationSizeMismatch(plane, size) => f.write_fmt(format_args!(
                "Destination {} plane size mismatch: expected={}, received={}",
                plane, size.expected, size.received
            )),
            InvalidImageError::PointerOverflow => {
                f.write_str("Image size overflow pointer capabilities")
            }
        }
    }
}

impl Error for InvalidImageError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, InvalidImageError> {
    v0.checked_mul(v1).ok_or(InvalidImageError::PointerOverflow)
}

#[inline]
pub(crate) fn check_yuv420_dimensions(width: u32, height: u32) -> Result<(), InvalidImageError> {
    if width == 0 || height == 0 {
        return Err(InvalidImageError::ZeroBaseSize);
    }
    if width & 1 != 0 || height & 1 != 0 {
        return Err(InvalidImageError::OddDimensions { width, height });
    }
    check_overflow_v2(width as usize, height as usize)?;
    Ok(())
}

#[inline]
pub(crate) fn check_plane_count(count: usize) -> Result<(), InvalidImageError> {
    if count != 3 {
        return Err(InvalidImageError::PlaneCountMismatch(MismatchedSize {
            expected: 3,
            received: count,
        }));
    }
    Ok(())
}

/// Checks that `rows` rows, each spanning `row_span` bytes and starting `row_stride`
/// bytes apart, are all readable from `data`.
#[inline]
fn check_source_rows(
    plane: YuvPlane,
    data: &[u8],
    row_stride: u32,
    row_span: usize,
    rows: usize,
) -> Result<(), InvalidImageError> {
    if (row_stride as usize) < row_span {
        return Err(InvalidImageError::RowStrideMismatch(
            plane,
            MismatchedSize {
                expected: row_span,
                received: row_stride as usize,
            },
        ));
    }
    let required = check_overflow_v2(row_stride as usize, rows)?;
    if data.len() < required {
        return Err(InvalidImageError::PlaneSizeMismatch(
            plane,
            MismatchedSize {
                expected: required,
                received: data.len(),
            },
        ));
    }
    Ok(())
}

/// Luma is read with an implicit pixel stride of 1, whatever the plane reports.
#[inline]
pub(crate) fn check_luma_source(
    data: &[u8],
    row_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), InvalidImageError> {
    check_source_rows(
        YuvPlane::Y,
        data,
        row_stride,
        width as usize,
        height as usize,
    )
}

#[inline]
pub(crate) fn check_chroma_source(
    plane: YuvPlane,
    data: &[u8],
    row_stride: u32,
    pixel_stride: u32,
    image_width: u32,
    image_height: u32,
) -> Result<ChromaLayout, InvalidImageError> {
    debug_assert!(plane.is_chroma());
    let layout = ChromaLayout::try_from(pixel_stride)
        .map_err(|stride| InvalidImageError::UnsupportedPixelStride(plane, stride))?;
    let chroma_width = image_width as usize / 2;
    let chroma_height = image_height as usize / 2;
    // The last sample of a row sits at `(chroma_width - 1) * pixel_stride`, trailing
    // interleaved bytes of the other channel are not required.
    let row_span = (chroma_width - 1) * layout.pixel_stride() + 1;
    check_source_rows(plane, data, row_stride, row_span, chroma_height)?;
    Ok(layout)
}

#[inline]
pub(crate) fn check_destination_plane<V>(
    plane: YuvPlane,
    data: &[V],
    stride: u32,
    plane_width: usize,
    plane_height: usize,
) -> Result<(), InvalidImageError> {
    if (stride as usize) < plane_width {
        return Err(InvalidImageError::DestinationStrideMismatch(
            plane,
            MismatchedSize {
                expected: plane_width,
                received: stride as usize,
            },
        ));
    }
    let required = check_overflow_v2(stride as usize, plane_height)?;
    if data.len() != required {
        return Err(InvalidImageError::DestinationSizeMismatch(
            plane,
            MismatchedSize {
                expected: required,
                received: data.len(),
            },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_rejects_zero_and_odd() {
        assert_eq!(
            check_yuv420_dimensions(0, 4),
            Err(InvalidImageError::ZeroBaseSize)
        );
        assert_eq!(
            check_yuv420_dimensions(4, 0),
            Err(InvalidImageError::ZeroBaseSize)
        );
        assert_eq!(
            check_yuv420_dimensions(3, 4),
            Err(InvalidImageError::OddDimensions {
                width: 3,
                height: 4
            })
        );
        assert_eq!(
            check_yuv420_dimensions(4, 5),
            Err(InvalidImageError::OddDimensions {
                width: 4,
                height: 5
            })
        );
        assert!(check_yuv420_dimensions(2, 2).is_ok());
        assert!(check_yuv420_dimensions(640, 480).is_ok());
    }

    #[test]
    fn test_luma_source_row_stride_and_length() {
        let data = vec![0u8; 32];
        assert!(check_luma_source(&data, 8, 4, 4).is_ok());
        assert_eq!(
            check_luma_source(&data, 3, 4, 4),
            Err(InvalidImageError::RowStrideMismatch(
                YuvPlane::Y,
                MismatchedSize {
                    expected: 4,
                    received: 3
                }
            ))
        );
        assert_eq!(
            check_luma_source(&data[..31], 8, 4, 4),
            Err(InvalidImageError::PlaneSizeMismatch(
                YuvPlane::Y,
                MismatchedSize {
                    expected: 32,
                    received: 31
                }
            ))
        );
    }

    #[test]
    fn test_chroma_source_layouts() {
        let data = vec![0u8; 32];
        assert_eq!(
            check_chroma_source(YuvPlane::U, &data, 8, 2, 8, 8),
            Ok(ChromaLayout::SemiPlanar)
        );
        assert_eq!(
            check_chroma_source(YuvPlane::V, &data, 4, 1, 8, 8),
            Ok(ChromaLayout::Planar)
        );
        // Interleaved row needs (4 - 1) * 2 + 1 bytes.
        assert_eq!(
            check_chroma_source(YuvPlane::U, &data, 6, 2, 8, 4),
            Err(InvalidImageError::RowStrideMismatch(
                YuvPlane::U,
                MismatchedSize {
                    expected: 7,
                    received: 6
                }
            ))
        );
        assert_eq!(
            check_chroma_source(YuvPlane::V, &data, 4, 3, 8, 8),
            Err(InvalidImageError::UnsupportedPixelStride(YuvPlane::V, 3))
        );
        assert_eq!(
            check_chroma_source(YuvPlane::V, &data, 4, 0, 8, 8),
            Err(InvalidImageError::UnsupportedPixelStride(YuvPlane::V, 0))
        );
    }

    #[test]
    fn test_destination_plane() {
        let data = vec![0u8; 24];
        assert!(check_destination_plane(YuvPlane::Y, &data, 6, 4, 4).is_ok());
        assert_eq!(
            check_destination_plane(YuvPlane::U, &data, 2, 4, 4),
            Err(InvalidImageError::DestinationStrideMismatch(
                YuvPlane::U,
                MismatchedSize {
                    expected: 4,
                    received: 2
                }
            ))
        );
        assert_eq!(
            check_destination_plane(YuvPlane::Y, &data, 4, 4, 4),
            Err(InvalidImageError::DestinationSizeMismatch(
                YuvPlane::Y,
                MismatchedSize {
                    expected: 16,
                    received: 24
                }
            ))
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            check_overflow_v2(usize::MAX, 2),
            Err(InvalidImageError::PointerOverflow)
        );
        assert_eq!(check_overflow_v2(3, 5), Ok(15));
    }

    #[test]
    fn test_display_mentions_plane() {
        let error = InvalidImageError::UnsupportedPixelStride(YuvPlane::U, 4);
        assert_eq!(
            error.to_string(),
            "U plane pixel stride 4 is not supported, only 1 and 2 are"
        );
    }
}
