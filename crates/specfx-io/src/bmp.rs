//! Windows BMP support, 8-bit indexed and uncompressed only.
//!
//! # Layout
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0 | 14 | File header: `BM`, file size, reserved, pixel data offset |
//! | 14 | >= 40 | Info header: width, height, planes, bit count, compression, ... |
//! | 14 + info size | 4 per entry | Color table (B, G, R, 0) |
//! | pixel data offset | stride * rows | Samples, rows padded to 4 bytes |
//!
//! A positive height stores rows bottom-up, a negative one top-down. The
//! filters are row-order agnostic, so rows are kept in file order.
//!
//! # Header pass-through
//!
//! Every byte in front of the pixel array is kept verbatim in
//! [`BmpHeader::raw`] and written back unchanged. Filtering never edits
//! header fields; it only swaps the sample buffer via
//! [`Bitmap::with_samples`].
//!
//! # Example
//!
//! ```rust,ignore
//! use specfx_io::bmp;
//!
//! let bitmap = bmp::read("input.bmp")?;
//! println!("{}x{} stride {}", bitmap.width(), bitmap.height(), bitmap.stride());
//! bmp::write("copy.bmp", &bitmap)?;
//! ```

use crate::{IoError, IoResult, RasterReader, RasterWriter};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use specfx_core::{row_stride, SampleBuffer};
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, trace};

// === Constants ===

/// "BM" read as a little-endian u16.
const MAGIC: u16 = 0x4D42;
/// File header size.
const FILE_HEADER_SIZE: u32 = 14;
/// BITMAPINFOHEADER size, the smallest info header accepted.
const INFO_HEADER_SIZE: u32 = 40;
/// Uncompressed pixel data.
const BI_RGB: u32 = 0;
/// Palette entries of an 8-bit image.
const PALETTE_ENTRIES: usize = 256;
/// 72 DPI expressed in pixels per meter.
const DEFAULT_PPM: i32 = 2835;

// === Header ===

/// Parsed BMP header plus the raw bytes it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpHeader {
    raw: Vec<u8>,
    file_size: u32,
    data_offset: u32,
    info_size: u32,
    width: u32,
    height: i32,
    bit_count: u16,
    compression: u32,
    colors_used: u32,
}

impl BmpHeader {
    /// Parses the header at the start of `data`.
    fn parse(data: &[u8]) -> IoResult<Self> {
        if data.len() < (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as usize {
            return Err(IoError::Format(format!(
                "file too short for a BMP header: {} bytes",
                data.len()
            )));
        }

        let mut cur = Cursor::new(data);
        let magic = cur.read_u16::<LittleEndian>()?;
        if magic != MAGIC {
            return Err(IoError::Format(format!("invalid BMP magic: 0x{magic:04X}")));
        }
        let file_size = cur.read_u32::<LittleEndian>()?;
        cur.seek(SeekFrom::Current(4))?;
        let data_offset = cur.read_u32::<LittleEndian>()?;

        let info_size = cur.read_u32::<LittleEndian>()?;
        if info_size < INFO_HEADER_SIZE {
            return Err(IoError::Format(format!(
                "unsupported info header size {info_size} (need >= {INFO_HEADER_SIZE})"
            )));
        }
        let width = cur.read_i32::<LittleEndian>()?;
        let height = cur.read_i32::<LittleEndian>()?;
        let _planes = cur.read_u16::<LittleEndian>()?;
        let bit_count = cur.read_u16::<LittleEndian>()?;
        let compression = cur.read_u32::<LittleEndian>()?;
        let _size_image = cur.read_u32::<LittleEndian>()?;
        let _x_ppm = cur.read_i32::<LittleEndian>()?;
        let _y_ppm = cur.read_i32::<LittleEndian>()?;
        let colors_used = cur.read_u32::<LittleEndian>()?;

        if bit_count != 8 {
            return Err(IoError::UnsupportedBitDepth(bit_count));
        }
        if compression != BI_RGB {
            return Err(IoError::UnsupportedCompression(compression));
        }
        if width <= 0 {
            return Err(IoError::Format(format!("invalid width {width}")));
        }
        if height == 0 || height == i32::MIN {
            return Err(IoError::Format(format!("invalid height {height}")));
        }

        let header_end = FILE_HEADER_SIZE as u64 + info_size as u64;
        if (data_offset as u64) < header_end {
            return Err(IoError::Format(format!(
                "pixel data offset {data_offset} overlaps the {header_end}-byte header"
            )));
        }
        if data_offset as usize > data.len() {
            return Err(IoError::Format(format!(
                "pixel data offset {data_offset} beyond end of file ({} bytes)",
                data.len()
            )));
        }

        Ok(Self {
            raw: data[..data_offset as usize].to_vec(),
            file_size,
            data_offset,
            info_size,
            width: width as u32,
            height,
            bit_count,
            compression,
            colors_used,
        })
    }

    /// Synthesizes a header for a fresh bottom-up grayscale image.
    fn grayscale(width: usize, height: usize) -> IoResult<Self> {
        let too_large = || IoError::Format(format!("{width}x{height} is too large for BMP"));
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = u32::try_from(row_stride(width) * height).map_err(|_| too_large())?;
        let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + (PALETTE_ENTRIES * 4) as u32;
        let file_size = data_offset.checked_add(image_size).ok_or_else(too_large)?;

        let mut raw = Vec::with_capacity(data_offset as usize);
        raw.write_u16::<LittleEndian>(MAGIC)?;
        raw.write_u32::<LittleEndian>(file_size)?;
        raw.write_u32::<LittleEndian>(0)?;
        raw.write_u32::<LittleEndian>(data_offset)?;

        raw.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
        raw.write_i32::<LittleEndian>(w)?;
        raw.write_i32::<LittleEndian>(h)?;
        raw.write_u16::<LittleEndian>(1)?;
        raw.write_u16::<LittleEndian>(8)?;
        raw.write_u32::<LittleEndian>(BI_RGB)?;
        raw.write_u32::<LittleEndian>(image_size)?;
        raw.write_i32::<LittleEndian>(DEFAULT_PPM)?;
        raw.write_i32::<LittleEndian>(DEFAULT_PPM)?;
        raw.write_u32::<LittleEndian>(PALETTE_ENTRIES as u32)?;
        raw.write_u32::<LittleEndian>(0)?;

        for level in 0..=u8::MAX {
            raw.extend_from_slice(&[level, level, level, 0]);
        }

        Ok(Self {
            raw,
            file_size,
            data_offset,
            info_size: INFO_HEADER_SIZE,
            width: w as u32,
            height: h,
            bit_count: 8,
            compression: BI_RGB,
            colors_used: PALETTE_ENTRIES as u32,
        })
    }

    /// Every byte in front of the pixel array, verbatim.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// File size declared in the file header.
    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    /// Offset of the pixel array.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.height.unsigned_abs() as usize
    }

    /// `true` when rows are stored top-down (negative height).
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Bits per sample (always 8 for a parsed header).
    pub fn bit_count(&self) -> u16 {
        self.bit_count
    }

    /// Compression code (always `BI_RGB` for a parsed header).
    pub fn compression(&self) -> u32 {
        self.compression
    }

    /// Padded row length in bytes.
    pub fn stride(&self) -> usize {
        row_stride(self.width as usize)
    }

    /// Color table bytes (B, G, R, reserved per entry).
    pub fn palette(&self) -> &[u8] {
        let start = (FILE_HEADER_SIZE + self.info_size) as usize;
        let available = (self.raw.len() - start) / 4;
        let declared = match self.colors_used {
            0 => PALETTE_ENTRIES,
            n => n as usize,
        };
        let entries = declared.min(available).min(PALETTE_ENTRIES);
        &self.raw[start..start + entries * 4]
    }

    /// Number of color table entries.
    pub fn palette_len(&self) -> usize {
        self.palette().len() / 4
    }

    /// `true` if entry `i` of the color table is the gray level `i`.
    pub fn is_identity_grayscale(&self) -> bool {
        self.palette()
            .chunks_exact(4)
            .enumerate()
            .all(|(i, e)| e[0] as usize == i && e[1] as usize == i && e[2] as usize == i)
    }
}

// === Bitmap ===

/// A BMP file split into its opaque header and its sample buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    header: BmpHeader,
    samples: SampleBuffer,
}

impl Bitmap {
    /// Creates a fresh 8-bit bitmap with a linear gray color table.
    ///
    /// Used for synthetic rasters and derived views such as spectra;
    /// filtered results of an existing file go through [`Bitmap::with_samples`].
    pub fn new_grayscale(samples: SampleBuffer) -> IoResult<Self> {
        let header = BmpHeader::grayscale(samples.width(), samples.height())?;
        Ok(Self { header, samples })
    }

    /// Header of the source file.
    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    /// Sample buffer.
    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.samples.width()
    }

    /// Image height in rows.
    pub fn height(&self) -> usize {
        self.samples.height()
    }

    /// Padded row length.
    pub fn stride(&self) -> usize {
        self.samples.stride()
    }

    /// Returns a bitmap with this header and new samples of the same shape.
    pub fn with_samples(&self, samples: SampleBuffer) -> IoResult<Self> {
        if samples.width() != self.width()
            || samples.height() != self.height()
            || samples.stride() != self.stride()
        {
            return Err(IoError::Format(format!(
                "sample buffer {}x{} (stride {}) does not match bitmap {}x{} (stride {})",
                samples.width(),
                samples.height(),
                samples.stride(),
                self.width(),
                self.height(),
                self.stride()
            )));
        }
        Ok(Self {
            header: self.header.clone(),
            samples,
        })
    }
}

// === Reader ===

/// BMP reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmpReader;

impl BmpReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl RasterReader for BmpReader {
    fn format_name(&self) -> &'static str {
        "BMP"
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= 2 && u16::from_le_bytes([header[0], header[1]]) == MAGIC
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Bitmap> {
        let path = path.as_ref();
        trace!(path = %path.display(), "bmp::read");
        let data = std::fs::read(path)?;
        self.read_from_memory(&data)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<Bitmap> {
        let header = BmpHeader::parse(data)?;
        let width = header.width();
        let height = header.height();
        let stride = header.stride();

        let start = header.data_offset() as usize;
        let len = stride
            .checked_mul(height)
            .ok_or_else(|| IoError::Format(format!("{width}x{height} overflows")))?;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| {
                IoError::Format(format!(
                    "truncated pixel data: need {len} bytes at offset {start}, file has {}",
                    data.len()
                ))
            })?;

        let samples = SampleBuffer::from_raw(width, height, stride, data[start..end].to_vec())?;
        debug!(
            width,
            height,
            stride,
            top_down = header.is_top_down(),
            palette = header.palette_len(),
            "Read BMP"
        );
        Ok(Bitmap { header, samples })
    }
}

// === Writer ===

/// BMP writer; emits the stored header followed by the samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmpWriter;

impl BmpWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }

    fn write_to<W: Write>(&self, writer: &mut W, bitmap: &Bitmap) -> IoResult<()> {
        writer.write_all(bitmap.header.raw())?;
        writer.write_all(bitmap.samples.as_bytes())?;
        Ok(())
    }
}

impl RasterWriter for BmpWriter {
    fn format_name(&self) -> &'static str {
        "BMP"
    }

    fn write<P: AsRef<Path>>(&self, path: P, bitmap: &Bitmap) -> IoResult<()> {
        let path = path.as_ref();
        trace!(path = %path.display(), "bmp::write");
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, bitmap)?;
        writer.flush()?;
        debug!(path = %path.display(), width = bitmap.width(), height = bitmap.height(), "Wrote BMP");
        Ok(())
    }

    fn write_to_memory(&self, bitmap: &Bitmap) -> IoResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(bitmap.header.raw().len() + bitmap.samples.as_bytes().len());
        self.write_to(&mut buf, bitmap)?;
        Ok(buf)
    }
}

// === Convenience Functions ===

/// Reads an 8-bit BMP file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    BmpReader.read(path)
}

/// Parses an 8-bit BMP held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Bitmap> {
    BmpReader.read_from_memory(data)
}

/// Writes a bitmap, reusing its original header bytes.
pub fn write<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> IoResult<()> {
    BmpWriter.write(path, bitmap)
}

// === Tests ===
