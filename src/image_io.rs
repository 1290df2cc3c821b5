use std::fmt;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    Io(String),
    Parse { path: String, message: String },
    Empty(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Parse { path, message } => write!(f, "bad image '{path}': {message}"),
            Self::Empty(path) => write!(f, "no usable images under '{path}'"),
        }
    }
}

impl std::error::Error for ImageError {}

/// RGBA bitmap, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ImageBitmap {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0, "bitmap must not be empty");
        assert_eq!(
            rgba.len(),
            width as usize * height as usize * 4,
            "rgba length does not match {width}x{height}"
        );
        Self { width, height, rgba }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    pub fn load(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path).map_err(|e| ImageError::Io(format!("{}: {e}", path.display())))?;
        parse_ppm(&bytes).map_err(|message| ImageError::Parse {
            path: path.display().to_string(),
            message,
        })
    }
}

/// Binary `P6` with maxval 255. Comments (`#`) may appear between header fields.
fn parse_ppm(bytes: &[u8]) -> Result<ImageBitmap, String> {
    let mut pos = 0usize;
    let magic = next_token(bytes, &mut pos).ok_or("missing magic")?;
    if magic != b"P6" {
        return Err(format!("unsupported magic '{}'", String::from_utf8_lossy(magic)));
    }
    let width = parse_header_num(bytes, &mut pos, "width")?;
    let height = parse_header_num(bytes, &mut pos, "height")?;
    let maxval = parse_header_num(bytes, &mut pos, "maxval")?;
    if maxval != 255 {
        return Err(format!("only maxval 255 is supported, got {maxval}"));
    }
    if width == 0 || height == 0 {
        return Err("zero sized image".to_string());
    }
    // Exactly one whitespace byte separates the header from the raster.
    pos += 1;

    let need = width as usize * height as usize * 3;
    let raster = bytes.get(pos..pos + need).ok_or_else(|| {
        format!(
            "truncated raster: need {need} bytes, have {}",
            bytes.len().saturating_sub(pos)
        )
    })?;

    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for px in raster.chunks_exact(3) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    Ok(ImageBitmap::from_rgba(width, height, rgba))
}

fn next_token<'a>(bytes: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    loop {
        while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < bytes.len() && bytes[*pos] == b'#' {
            while *pos < bytes.len() && bytes[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }
    let start = *pos;
    while *pos < bytes.len() && !bytes[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    (start < *pos).then(|| &bytes[start..*pos])
}

fn parse_header_num(bytes: &[u8], pos: &mut usize, what: &str) -> Result<u32, String> {
    let tok = next_token(bytes, pos).ok_or_else(|| format!("missing {what}"))?;
    std::str::from_utf8(tok)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| format!("bad {what} '{}'", String::from_utf8_lossy(tok)))
}

pub fn encode_ppm(width: usize, height: usize, rgba: &[u8]) -> Vec<u8> {
    let mut out = format!("P6\n{width} {height}\n255\n").into_bytes();
    out.reserve(width * height * 3);
    for px in rgba.chunks_exact(4).take(width * height) {
        out.extend_from_slice(&px[..3]);
    }
    out
}

pub fn write_ppm(path: &Path, width: usize, height: usize, rgba: &[u8]) -> Result<(), ImageError> {
    let body = encode_ppm(width, height, rgba);
    let mut file =
        std::fs::File::create(path).map_err(|e| ImageError::Io(format!("{}: {e}", path.display())))?;
    file.write_all(&body)
        .map_err(|e| ImageError::Io(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ppm_header_comments_are_skipped() {
        let mut bytes = b"P6\n# made by hand\n2 1\n255\n".to_vec();
        bytes.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
        let img = parse_ppm(&bytes).expect("parse");
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.pixel(1, 0), [40, 50, 60, 255]);
    }

    #[test]
    fn truncated_raster_is_rejected() {
        let bytes = b"P6 4 4 255\n\x00\x01".to_vec();
        assert!(parse_ppm(&bytes).is_err());
    }
}
