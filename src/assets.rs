/// Sprite loading.
///
/// Sprites are plain-text pixel art: an optional `tint: <colour>` header,
/// then one line per pixel row.  `.` and space are transparent; any other
/// character is an opaque pixel drawn with that glyph.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::collision::Mask;
use crate::config::GameConfig;

/// Terminal colour a sprite is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    White,
    Yellow,
    Red,
    Green,
    Cyan,
    Magenta,
    Brown,
    Grey,
    Blue,
}

impl Tint {
    fn from_name(name: &str) -> Option<Tint> {
        match name.to_ascii_lowercase().as_str() {
            "white" => Some(Tint::White),
            "yellow" => Some(Tint::Yellow),
            "red" => Some(Tint::Red),
            "green" => Some(Tint::Green),
            "cyan" => Some(Tint::Cyan),
            "magenta" => Some(Tint::Magenta),
            "brown" => Some(Tint::Brown),
            "grey" | "gray" => Some(Tint::Grey),
            "blue" => Some(Tint::Blue),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum AssetError {
    Io { path: PathBuf, source: std::io::Error },
    /// The file holds no opaque pixel.
    Empty { path: PathBuf },
    UnknownTint { path: PathBuf, name: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, source } => {
                write!(f, "cannot read sprite {}: {}", path.display(), source)
            }
            AssetError::Empty { path } => {
                write!(f, "sprite {} has no opaque pixels", path.display())
            }
            AssetError::UnknownTint { path, name } => {
                write!(f, "sprite {} uses unknown tint '{}'", path.display(), name)
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── Images ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    /// Row-major; `None` is transparent.
    pixels: Vec<Option<char>>,
    tint: Tint,
}

/// Shared handle; many entities bind the same image.
pub type ImageHandle = Rc<Image>;

impl Image {
    /// Parse sprite text.  `path` is only used for error messages.
    pub fn parse(path: &Path, text: &str) -> Result<Image, AssetError> {
        let mut tint = Tint::White;
        let mut lines = text.lines().peekable();

        if let Some(header) = lines.peek().copied().and_then(|l| l.strip_prefix("tint:")) {
            let name = header.trim();
            tint = Tint::from_name(name).ok_or_else(|| AssetError::UnknownTint {
                path: path.to_path_buf(),
                name: name.to_string(),
            })?;
            lines.next();
        }

        let rows: Vec<Vec<char>> = lines.map(|l| l.trim_end_matches('\r').chars().collect()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();

        let mut pixels = Vec::with_capacity(width * height);
        for row in &rows {
            for x in 0..width {
                let pixel = match row.get(x) {
                    Some('.') | Some(' ') | None => None,
                    Some(&c) => Some(c),
                };
                pixels.push(pixel);
            }
        }

        if pixels.iter().all(Option::is_none) {
            return Err(AssetError::Empty { path: path.to_path_buf() });
        }

        Ok(Image {
            width: width as u32,
            height: height as u32,
            pixels,
            tint,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    /// Glyph at `(x, y)`, `None` when transparent or out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<char> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }

    /// Nearest-neighbour resize.
    pub fn scaled(&self, width: u32, height: u32) -> Image {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height.max(1) as u64) as i32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width.max(1) as u64) as i32;
                pixels.push(self.pixel(sx, sy));
            }
        }
        Image {
            width,
            height,
            pixels,
            tint: self.tint,
        }
    }
}

pub fn load_image(path: &Path) -> Result<Image, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = Image::parse(path, &text)?;
    log::debug!("loaded sprite {} ({}x{})", path.display(), image.width, image.height);
    Ok(image)
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// An image together with its collision mask.  The mask is built here and
/// nowhere else, so swapping a sprite swaps the mask with it.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub image: ImageHandle,
    pub mask: Rc<Mask>,
}

impl Sprite {
    pub fn new(image: Image) -> Sprite {
        let mask = Rc::new(Mask::from_image(&image));
        Sprite {
            image: Rc::new(image),
            mask,
        }
    }
}

/// Every sprite the game needs, scaled to the tile size.
#[derive(Clone, Debug)]
pub struct Assets {
    pub cletus: Sprite,
    pub cletus_walk: Rc<[ImageHandle]>,
    pub cletus_shoot: ImageHandle,
    pub hippie: Sprite,
    pub hippie_walk: Rc<[ImageHandle]>,
    pub cookie: Sprite,
    pub bullet: Sprite,
}

impl Assets {
    /// Load all sprites from `dir`.  Any missing or malformed file aborts.
    pub fn load(dir: &Path, config: &GameConfig) -> Result<Assets, AssetError> {
        let (w, h) = config.tile();
        let tile = |name: &str| -> Result<Image, AssetError> {
            Ok(load_image(&dir.join(format!("{}.txt", name)))?.scaled(w, h))
        };

        let walk_01 = tile("cletus_walk_01")?;
        let cletus = Sprite::new(walk_01.clone());
        let cletus_walk: Rc<[ImageHandle]> =
            vec![Rc::new(walk_01), Rc::new(tile("cletus_walk_02")?)].into();

        Ok(Assets {
            cletus,
            cletus_walk,
            cletus_shoot: Rc::new(tile("cletus_shoot")?),
            hippie: Sprite::new(tile("hippie")?),
            hippie_walk: vec![
                Rc::new(tile("hippie_walk_01")?),
                Rc::new(tile("hippie_walk_02")?),
            ]
            .into(),
            cookie: Sprite::new(tile("cookie")?),
            bullet: Sprite::new(tile("bullet")?),
        })
    }
}
