use std::{fs, path::Path};

use log::debug;

use crate::{
    camera::Camera,
    lighting::Point,
    material::Material,
    object::{Cylinder, DrawMode, Plane, Sphere},
    scene::Scene,
};

use super::{load_mesh, tokenize::Reader, LoadError};

/// Read and parse a scene file, loading every mesh it refers to.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_scene(&source, path)
}

/// Parse scene text. `path` names the source in errors, and mesh files are
/// looked up next to it.
pub fn parse_scene(source: &str, path: &Path) -> Result<Scene, LoadError> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut reader = Reader::new(source, path);
    let mut scene = Scene::default();

    while let Some(token) = reader.next_token() {
        debug!("{}:{}: {}", path.display(), token.line, token.text);

        match token.text {
            "depth" => scene.options.max_depth = reader.value("recursion depth")?,
            "camera" => scene.camera = read_camera(&mut reader)?,
            "background" => scene.options.background = reader.vector("background color")?,
            "ambience" => scene.options.ambient = reader.vector("ambient color")?,
            "light" => {
                let position = reader.vector("light position")?;
                let color = reader.vector("light color")?;
                scene.lights.push(Box::new(Point::new(position, color)));
            }
            "plane" => {
                let center = reader.vector("plane center")?;
                let normal = reader.vector("plane normal")?;
                let material = read_material(&mut reader)?;
                scene
                    .objects
                    .push(Box::new(Plane::new(center, normal, material)));
            }
            "sphere" => {
                let center = reader.vector("sphere center")?;
                let radius = reader.value("sphere radius")?;
                let material = read_material(&mut reader)?;
                scene
                    .objects
                    .push(Box::new(Sphere::new(center, radius, material)));
            }
            "cylinder" => {
                let center = reader.vector("cylinder center")?;
                let radius = reader.value("cylinder radius")?;
                let axis = reader.vector("cylinder axis")?;
                let height = reader.value("cylinder height")?;
                let material = read_material(&mut reader)?;
                scene.objects.push(Box::new(Cylinder::new(
                    center, radius, axis, height, material,
                )));
            }
            "mesh" => {
                let file = reader.expect_token("mesh file name")?;
                let mode = reader.expect_token("draw mode")?;
                let draw_mode = match mode.text {
                    "FLAT" => DrawMode::Flat,
                    "PHONG" => DrawMode::Phong,
                    _ => {
                        return Err(LoadError::InvalidDrawMode {
                            path: path.to_path_buf(),
                            line: mode.line,
                            token: mode.text.to_string(),
                        })
                    }
                };
                let material = read_material(&mut reader)?;
                let mesh = load_mesh(&base_dir.join(file.text), draw_mode, material)?;
                scene.objects.push(Box::new(mesh));
            }
            _ => {
                return Err(LoadError::UnknownDirective {
                    path: path.to_path_buf(),
                    line: token.line,
                    token: token.text.to_string(),
                })
            }
        }
    }

    Ok(scene)
}

fn read_camera(reader: &mut Reader<'_>) -> Result<Camera, LoadError> {
    let eye = reader.vector("camera eye")?;
    let center = reader.vector("camera center")?;
    let up = reader.vector("camera up vector")?;
    let fovy = reader.value("camera field of view")?;
    let width = reader.value("image width")?;
    let height = reader.value("image height")?;

    Ok(Camera::new(eye, center, up, fovy, width, height))
}

fn read_material(reader: &mut Reader<'_>) -> Result<Material, LoadError> {
    Ok(Material {
        ambient: reader.vector("ambient reflectance")?,
        diffuse: reader.vector("diffuse reflectance")?,
        specular: reader.vector("specular reflectance")?,
        shininess: reader.value("shininess")?,
        mirror: reader.value("mirror weight")?,
    })
}
