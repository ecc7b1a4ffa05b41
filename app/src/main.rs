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
mod support;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use support::{read_plane, save_luma_png, save_packed_frame};
use tracing::{debug, info};
use yuv_extract::{
    extract, ChromaLayout, InvalidImageError, PlaneBuffer, SourceImage, YuvPlane,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PackedFormat {
    I420,
    Nv12,
    Nv21,
}

#[derive(Parser, Debug)]
#[command(name = "yuv-extract-app")]
#[command(about = "Packs raw camera plane dumps into a contiguous YUV 4:2:0 file")]
#[command(version)]
struct Cli {
    /// Image width in pixels, must be even
    #[arg(long, default_value = "640")]
    width: u32,

    /// Image height in pixels, must be even
    #[arg(long, default_value = "480")]
    height: u32,

    /// Raw luma plane bytes
    #[arg(long)]
    y: PathBuf,

    /// Raw U plane bytes
    #[arg(long)]
    u: PathBuf,

    /// Raw V plane bytes
    #[arg(long)]
    v: PathBuf,

    /// Bytes between luma rows [default: width]
    #[arg(long)]
    y_row_stride: Option<u32>,

    /// Bytes between chroma rows [default: width / 2 * uv-pixel-stride]
    #[arg(long)]
    uv_row_stride: Option<u32>,

    /// Bytes between chroma samples, 2 for interleaved chroma
    #[arg(long, default_value = "1")]
    uv_pixel_stride: u32,

    /// Layout of the output file
    #[arg(short, long, value_enum, default_value = "i420")]
    format: PackedFormat,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the luma plane as a grayscale PNG
    #[arg(long)]
    luma_png: Option<PathBuf>,
}

/// Chroma row stride to use when none was given on the command line.
///
/// Only pixel strides 1 and 2 are accepted, so the product can't overflow.
fn resolve_uv_row_stride(
    width: u32,
    uv_row_stride: Option<u32>,
    uv_pixel_stride: u32,
) -> Result<u32, InvalidImageError> {
    let layout = ChromaLayout::try_from(uv_pixel_stride)
        .map_err(|stride| InvalidImageError::UnsupportedPixelStride(YuvPlane::U, stride))?;
    Ok(uv_row_stride.unwrap_or((width / 2) * layout.pixel_stride() as u32))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG controls verbosity, e.g. RUST_LOG=yuv_extract_app=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let y_row_stride = cli.y_row_stride.unwrap_or(cli.width);
    let uv_row_stride =
        resolve_uv_row_stride(cli.width, cli.uv_row_stride, cli.uv_pixel_stride)?;

    let y_data = read_plane(&cli.y)?;
    let u_data = read_plane(&cli.u)?;
    let v_data = read_plane(&cli.v)?;
    debug!(
        y = y_data.len(),
        u = u_data.len(),
        v = v_data.len(),
        "Read plane dumps"
    );

    let planes = [
        PlaneBuffer::new(&y_data, y_row_stride, 1),
        PlaneBuffer::new(&u_data, uv_row_stride, cli.uv_pixel_stride),
        PlaneBuffer::new(&v_data, uv_row_stride, cli.uv_pixel_stride),
    ];
    let image = SourceImage::new(&planes, cli.width, cli.height);

    let (u_layout, v_layout) = image.check_constraints()?;
    info!(
        width = cli.width,
        height = cli.height,
        y_row_stride,
        uv_row_stride,
        ?u_layout,
        ?v_layout,
        "Extracting frame"
    );

    let start_time = Instant::now();
    let frame = extract(&image)?;
    debug!(elapsed = ?start_time.elapsed(), "Extraction finished");

    let packed = match cli.format {
        PackedFormat::I420 => frame.to_i420(),
        PackedFormat::Nv12 => frame.to_nv12(),
        PackedFormat::Nv21 => frame.to_nv21(),
    };
    save_packed_frame(&cli.output, &packed)?;
    info!(path = %cli.output.display(), format = ?cli.format, bytes = packed.len(), "Saved frame");

    if let Some(luma_png) = &cli.luma_png {
        save_luma_png(luma_png, &frame)?;
        info!(path = %luma_png.display(), "Saved luma preview");
    }

    Ok(())
}
