use crate::error::DemoError;
use image::ImageReader;
use std::path::Path;

pub struct Texture {
    id: u32,
    width: u32,
    height: u32,
}

impl Texture {
    /// Decodes an image file and uploads it as an RGBA8 texture with
    /// repeat wrapping and mipmaps. `flip_vertically` matches image
    /// origin (top-left) to GL texture origin (bottom-left).
    pub fn from_file<P: AsRef<Path>>(path: P, flip_vertically: bool) -> Result<Self, DemoError> {
        let path = path.as_ref();
        let img = ImageReader::open(path)
            .map_err(|e| DemoError::TextureLoad {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(e),
            })?
            .decode()
            .map_err(|source| DemoError::TextureLoad {
                path: path.to_path_buf(),
                source,
            })?;

        let img = if flip_vertically { img.flipv() } else { img };
        let img = img.to_rgba8();

        let (width, height) = (img.width(), img.height());
        let data = img.into_raw();

        let mut id = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                gl::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const _,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Ok(Self { id, width, height })
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Decode failures are reported before any GL call, so this runs
    // without a context.
    #[test]
    fn missing_image_fails_with_texture_load() {
        match Texture::from_file("assets/nope.png", true) {
            Err(DemoError::TextureLoad { path, .. }) => {
                assert_eq!(path, Path::new("assets/nope.png"));
            }
            Err(other) => panic!("expected TextureLoad, got {other:?}"),
            Ok(_) => panic!("missing image must fail"),
        }
    }
}
