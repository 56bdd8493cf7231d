//! Binary `.map` and `.blk` formats consumed by the game player
//!
//! All integers are little-endian. Layout of a `.map` file:
//!
//! ```text
//! u32 MAP_MAGIC | u16 version | u16 width | u16 height | u8 floor count
//! string chipset | string music          (string = u32 length + UTF-8 bytes)
//! per floor: u8 layer count, then per layer: i8 position + width*height cells
//!            of 3 bytes (chipset_x, chipset_y, chipset_id), row-major
//! ```
//!
//! A `.blk` file is `u32 BLK_MAGIC` followed by one `width*height` byte grid
//! per floor (0 = free, anything else = blocked).

use crate::{BlockingLayer, Floor, GraphicLayer, Map, TileAspect, MAX_MAP_SIZE};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Magic number opening a `.map` file
pub const MAP_MAGIC: u32 = 0xF000_BA44;
/// Magic number opening a `.blk` file
pub const BLK_MAGIC: u32 = 0xB10C_4B5F;
/// Version written into `.map` files
pub const MAP_FORMAT_VERSION: u16 = 2;

pub const MAP_EXTENSION: &str = "map";
pub const BLOCKING_EXTENSION: &str = "blk";
pub const EVENTS_EXTENSION: &str = "lua";

#[derive(Debug)]
pub enum MapFileError {
    Io(String),
    BadMagic { expected: u32, found: u32 },
    UnsupportedVersion(u16),
    UnexpectedEof,
    TooManyFloors(usize),
    TooManyLayers(usize),
    StringTooLong(usize),
    InvalidString,
    /// Header dimensions outside `1..=MAX_MAP_SIZE`
    InvalidDimensions { width: u16, height: u16 },
    /// Two graphic layers of one floor share a position
    DuplicateLayer(i8),
}

impl std::fmt::Display for MapFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapFileError::Io(e) => write!(f, "IO error: {}", e),
            MapFileError::BadMagic { expected, found } => write!(
                f,
                "Bad magic number: expected {:#010x}, found {:#010x}",
                expected, found
            ),
            MapFileError::UnsupportedVersion(v) => write!(f, "Unsupported map version: {}", v),
            MapFileError::UnexpectedEof => write!(f, "Unexpected end of file"),
            MapFileError::TooManyFloors(n) => write!(f, "Too many floors to save: {}", n),
            MapFileError::TooManyLayers(n) => write!(f, "Too many layers on one floor: {}", n),
            MapFileError::StringTooLong(n) => write!(f, "String too long to save: {} bytes", n),
            MapFileError::InvalidString => write!(f, "String is not valid UTF-8"),
            MapFileError::InvalidDimensions { width, height } => {
                write!(f, "Invalid map dimensions: {}x{}", width, height)
            }
            MapFileError::DuplicateLayer(position) => {
                write!(f, "Duplicate graphic layer at position {}", position)
            }
        }
    }
}

impl std::error::Error for MapFileError {}

impl From<std::io::Error> for MapFileError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == ErrorKind::UnexpectedEof {
            MapFileError::UnexpectedEof
        } else {
            MapFileError::Io(e.to_string())
        }
    }
}

/// Fixed-size fields opening a `.map` file
struct MapHeader {
    width: u16,
    height: u16,
    floor_count: u8,
}

/// Write the graphic part of `map` in `.map` format
pub fn write_map<W: Write>(writer: &mut W, map: &Map) -> Result<(), MapFileError> {
    let floor_count =
        u8::try_from(map.floor_count()).map_err(|_| MapFileError::TooManyFloors(map.floor_count()))?;

    writer.write_all(&MAP_MAGIC.to_le_bytes())?;
    writer.write_all(&MAP_FORMAT_VERSION.to_le_bytes())?;
    writer.write_all(&map.width().to_le_bytes())?;
    writer.write_all(&map.height().to_le_bytes())?;
    writer.write_all(&[floor_count])?;
    write_string(writer, &map.chipset)?;
    write_string(writer, &map.music)?;

    for floor in map.floors() {
        let count = floor.graphic_layer_count();
        let layer_count = u8::try_from(count).map_err(|_| MapFileError::TooManyLayers(count))?;
        writer.write_all(&[layer_count])?;

        for (position, layer) in floor.graphic_layers() {
            writer.write_all(&position.to_le_bytes())?;
            let mut bytes = Vec::with_capacity(layer.len() * 3);
            for aspect in layer.cells() {
                bytes.extend_from_slice(&[aspect.chipset_x, aspect.chipset_y, aspect.chipset_id]);
            }
            writer.write_all(&bytes)?;
        }
    }
    Ok(())
}

/// Read a `.map` file into a map named `name` whose floors have empty blocking layers
pub fn read_map<R: Read>(reader: &mut R, name: &str) -> Result<Map, MapFileError> {
    let header = read_header(reader)?;
    let chipset = read_string(reader)?;
    let music = read_string(reader)?;

    let mut map = Map::empty(name, header.width, header.height);
    map.set_chipset(chipset);
    map.set_music(music);

    let cell_count = usize::from(header.width) * usize::from(header.height);
    for _ in 0..header.floor_count {
        let mut floor = Floor::new(header.width, header.height);
        let layer_count = read_u8(reader)?;

        for _ in 0..layer_count {
            let position = read_u8(reader)? as i8;
            if floor.graphic_layer(position).is_some() {
                return Err(MapFileError::DuplicateLayer(position));
            }
            let mut bytes = vec![0u8; cell_count * 3];
            reader.read_exact(&mut bytes)?;
            let cells = bytes
                .chunks_exact(3)
                .map(|c| TileAspect {
                    chipset_x: c[0],
                    chipset_y: c[1],
                    chipset_id: c[2],
                })
                .collect();
            // Length is cell_count by construction
            if let Some(layer) = GraphicLayer::from_cells(header.width, header.height, cells) {
                floor.insert_graphic_layer(position, layer);
            }
        }
        map.push_floor(floor);
    }
    Ok(map)
}

fn read_header<R: Read>(reader: &mut R) -> Result<MapHeader, MapFileError> {
    let magic = read_u32(reader)?;
    if magic != MAP_MAGIC {
        return Err(MapFileError::BadMagic {
            expected: MAP_MAGIC,
            found: magic,
        });
    }
    let version = read_u16(reader)?;
    if version != MAP_FORMAT_VERSION {
        return Err(MapFileError::UnsupportedVersion(version));
    }
    let width = read_u16(reader)?;
    let height = read_u16(reader)?;
    let valid = 1..=MAX_MAP_SIZE;
    if !valid.contains(&width) || !valid.contains(&height) {
        return Err(MapFileError::InvalidDimensions { width, height });
    }
    Ok(MapHeader {
        width,
        height,
        floor_count: read_u8(reader)?,
    })
}

/// Write every floor's blocking layer in `.blk` format
pub fn write_blocking<W: Write>(writer: &mut W, map: &Map) -> Result<(), MapFileError> {
    writer.write_all(&BLK_MAGIC.to_le_bytes())?;
    for floor in map.floors() {
        let bytes: Vec<u8> = floor
            .blocking_layer()
            .cells()
            .iter()
            .map(|&blocked| u8::from(blocked))
            .collect();
        writer.write_all(&bytes)?;
    }
    Ok(())
}

/// Read `floor_count` blocking grids of `width * height` cells
pub fn read_blocking<R: Read>(
    reader: &mut R,
    floor_count: usize,
    width: u16,
    height: u16,
) -> Result<Vec<BlockingLayer>, MapFileError> {
    let magic = read_u32(reader)?;
    if magic != BLK_MAGIC {
        return Err(MapFileError::BadMagic {
            expected: BLK_MAGIC,
            found: magic,
        });
    }

    let cell_count = usize::from(width) * usize::from(height);
    let mut layers = Vec::with_capacity(floor_count);
    for _ in 0..floor_count {
        let mut bytes = vec![0u8; cell_count];
        reader.read_exact(&mut bytes)?;
        let cells = bytes.into_iter().map(|b| b != 0).collect();
        if let Some(layer) = BlockingLayer::from_cells(width, height, cells) {
            layers.push(layer);
        }
    }
    Ok(layers)
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), MapFileError> {
    let len = u32::try_from(value.len()).map_err(|_| MapFileError::StringTooLong(value.len()))?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, MapFileError> {
    let len = read_u32(reader)? as usize;
    let mut bytes = Vec::new();
    Read::take(&mut *reader, len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(MapFileError::UnexpectedEof);
    }
    String::from_utf8(bytes).map_err(|_| MapFileError::InvalidString)
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8, MapFileError> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16, MapFileError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, MapFileError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Paths of the files making up map `name` inside `dir`
pub fn map_paths(dir: &Path, name: &str) -> (PathBuf, PathBuf, PathBuf) {
    (
        dir.join(format!("{}.{}", name, MAP_EXTENSION)),
        dir.join(format!("{}.{}", name, BLOCKING_EXTENSION)),
        dir.join(format!("{}.{}", name, EVENTS_EXTENSION)),
    )
}

impl Map {
    /// Save to `<dir>/<name>.map` and `<dir>/<name>.blk`
    ///
    /// Also creates an empty `<name>.lua` event script if there is none yet.
    pub fn save(&self, dir: &Path) -> Result<(), MapFileError> {
        let (map_path, blk_path, events_path) = map_paths(dir, &self.name);

        let mut blocking = Vec::new();
        write_blocking(&mut blocking, self)?;
        let mut graphic = Vec::new();
        write_map(&mut graphic, self)?;

        std::fs::write(&blk_path, blocking)?;
        std::fs::write(&map_path, graphic)?;
        if !events_path.exists() {
            std::fs::write(&events_path, "")?;
        }

        log::info!("Saved map '{}' to {:?}", self.name, dir);
        Ok(())
    }

    /// Load map `name` from its `.map` and `.blk` files in `dir`
    pub fn load(dir: &Path, name: &str) -> Result<Self, MapFileError> {
        let (map_path, blk_path, _) = map_paths(dir, name);

        let mut map_file = std::fs::File::open(&map_path)?;
        let mut map = read_map(&mut std::io::BufReader::new(&mut map_file), name)?;

        let mut blk_file = std::fs::File::open(&blk_path)?;
        let layers = read_blocking(
            &mut std::io::BufReader::new(&mut blk_file),
            map.floor_count(),
            map.width(),
            map.height(),
        )?;
        for (index, layer) in layers.into_iter().enumerate() {
            if let Some(floor) = map.floor_mut(index) {
                floor.set_blocking_layer(layer);
            }
        }

        log::info!("Loaded map '{}' from {:?}", name, dir);
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;

    fn sample_map() -> Map {
        let mut map = Map::new("Sample", 3, 2, "sample.png");
        map.set_music("town.ogg");
        map.floor_mut(0).unwrap().add_graphic_layer(-1);
        map.floor_mut(0)
            .unwrap()
            .graphic_layer_mut(0)
            .unwrap()
            .set(Coord::new(2, 1), TileAspect::new(3, 4, 5));
        map.floor_mut(0)
            .unwrap()
            .blocking_layer_mut()
            .set(Coord::new(1, 0), true);
        let upper = map.add_floor();
        map.floor_mut(upper)
            .unwrap()
            .blocking_layer_mut()
            .set(Coord::new(0, 1), true);
        map
    }

    #[test]
    fn test_header_layout() {
        let map = sample_map();
        let mut bytes = Vec::new();
        write_map(&mut bytes, &map).unwrap();

        assert_eq!(&bytes[0..4], &MAP_MAGIC.to_le_bytes());
        assert_eq!(&bytes[4..6], &2u16.to_le_bytes());
        assert_eq!(&bytes[6..8], &3u16.to_le_bytes());
        assert_eq!(&bytes[8..10], &2u16.to_le_bytes());
        assert_eq!(bytes[10], 2);
        assert_eq!(&bytes[11..15], &10u32.to_le_bytes());
        assert_eq!(&bytes[15..25], b"sample.png");
        // header + music + floor 0 (2 layers) + floor 1 (0 layers)
        let expected = 25 + 4 + 8 + 1 + 2 * (1 + 6 * 3) + 1;
        assert_eq!(bytes.len(), expected);
    }

    #[test]
    fn test_graphic_and_blocking_roundtrip() {
        let map = sample_map();
        let mut graphic = Vec::new();
        write_map(&mut graphic, &map).unwrap();
        let mut blocking = Vec::new();
        write_blocking(&mut blocking, &map).unwrap();
        assert_eq!(blocking.len(), 4 + 2 * 6);

        let mut restored = read_map(&mut graphic.as_slice(), "Sample").unwrap();
        let layers = read_blocking(&mut blocking.as_slice(), 2, 3, 2).unwrap();
        for (index, layer) in layers.into_iter().enumerate() {
            restored.floor_mut(index).unwrap().set_blocking_layer(layer);
        }

        assert_eq!(restored.chipset, "sample.png");
        assert_eq!(restored.music, "town.ogg");
        assert_eq!(restored.floors(), map.floors());
    }

    #[test]
    fn test_bad_magic() {
        let bytes = [0u8; 16];
        match read_map(&mut &bytes[..], "x") {
            Err(MapFileError::BadMagic { expected, found }) => {
                assert_eq!(expected, MAP_MAGIC);
                assert_eq!(found, 0);
            }
            other => panic!("Expected bad magic, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAP_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&7u16.to_le_bytes());
        assert!(matches!(
            read_map(&mut bytes.as_slice(), "x"),
            Err(MapFileError::UnsupportedVersion(7))
        ));
    }

    fn header(width: u16, height: u16, floor_count: u8) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAP_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&MAP_FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.push(floor_count);
        // empty chipset and music names
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes
    }

    #[test]
    fn test_zero_width_rejected() {
        let bytes = header(0, 5, 1);
        assert!(matches!(
            read_map(&mut bytes.as_slice(), "x"),
            Err(MapFileError::InvalidDimensions {
                width: 0,
                height: 5
            })
        ));
    }

    #[test]
    fn test_oversized_map_rejected() {
        let bytes = header(MAX_MAP_SIZE + 1, 1, 1);
        assert!(matches!(
            read_map(&mut bytes.as_slice(), "x"),
            Err(MapFileError::InvalidDimensions { width, height: 1 }) if width == MAX_MAP_SIZE + 1
        ));

        let bytes = header(3, u16::MAX, 1);
        assert!(matches!(
            read_map(&mut bytes.as_slice(), "x"),
            Err(MapFileError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_duplicate_layer_position_rejected() {
        let mut bytes = header(2, 1, 1);
        bytes.push(2);
        for _ in 0..2 {
            bytes.push(0);
            bytes.extend_from_slice(&[0xFF; 6]);
        }

        assert!(matches!(
            read_map(&mut bytes.as_slice(), "x"),
            Err(MapFileError::DuplicateLayer(0))
        ));
    }

    #[test]
    fn test_truncated_file() {
        let map = sample_map();
        let mut bytes = Vec::new();
        write_map(&mut bytes, &map).unwrap();
        bytes.truncate(bytes.len() - 5);

        assert!(matches!(
            read_map(&mut bytes.as_slice(), "Sample"),
            Err(MapFileError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("dummyrpg_map_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let map = sample_map();
        map.save(&dir).unwrap();
        let (_, _, events_path) = map_paths(&dir, "Sample");
        assert!(events_path.exists());

        let loaded = Map::load(&dir, "Sample").unwrap();
        assert_eq!(loaded.name, "Sample");
        assert_eq!((loaded.width(), loaded.height()), (3, 2));
        assert_eq!(loaded.floors(), map.floors());

        assert!(matches!(
            Map::load(&dir, "Missing"),
            Err(MapFileError::Io(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
