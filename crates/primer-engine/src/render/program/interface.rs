//! Stage compilation and linking on the CPU, via naga.
//!
//! wgpu reports shader errors through the device's uncaptured-error handler,
//! which by default panics. Compiling each stage here first gives a
//! `Result` with the compiler's own message, and the parsed module tells us
//! which `@location` each named vertex input lives at.

use naga::{AddressSpace, Binding, Handle, Module, ScalarKind, ShaderStage, Type, TypeInner, VectorSize};

use crate::render::{ProgramError, Stage};

/// Entry point every vertex source must define.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point every fragment source must define.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// A named vertex input and where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInfo {
    pub name: String,
    pub location: u32,
    pub format: wgpu::VertexFormat,
}

/// Bind point of a named uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocation {
    pub group: u32,
    pub binding: u32,
}

/// The linked interface of a vertex + fragment pair.
#[derive(Debug, Clone, Default)]
pub struct ProgramInterface {
    attributes: Vec<AttributeInfo>,
    uniforms: Vec<(String, UniformLocation)>,
}

impl ProgramInterface {
    /// Compiles both stages, checks their entry points, and links the
    /// fragment inputs against the vertex outputs.
    pub fn validate(vertex_source: &str, fragment_source: &str) -> Result<Self, ProgramError> {
        let vs = compile_stage(Stage::Vertex, vertex_source)?;
        let fs = compile_stage(Stage::Fragment, fragment_source)?;

        let vs_entry = find_entry(&vs, Stage::Vertex)?;
        let fs_entry = find_entry(&fs, Stage::Fragment)?;

        let outputs: Vec<u32> = match &vs_entry.function.result {
            Some(r) => slots(&vs, None, r.ty, r.binding.as_ref())
                .into_iter()
                .map(|s| s.location)
                .collect(),
            None => Vec::new(),
        };

        for arg in &fs_entry.function.arguments {
            for input in slots(&fs, arg.name.as_deref(), arg.ty, arg.binding.as_ref()) {
                if !outputs.contains(&input.location) {
                    return Err(ProgramError::Link {
                        name: input.name,
                        location: input.location,
                    });
                }
            }
        }

        let mut attributes = Vec::new();
        for arg in &vs_entry.function.arguments {
            for input in slots(&vs, arg.name.as_deref(), arg.ty, arg.binding.as_ref()) {
                let format = vertex_format(&vs.types[input.ty].inner)
                    .ok_or_else(|| ProgramError::UnsupportedAttribute(input.name.clone()))?;
                attributes.push(AttributeInfo {
                    name: input.name,
                    location: input.location,
                    format,
                });
            }
        }
        attributes.sort_by_key(|a| a.location);

        // Both stages share one pipeline layout: a name keeps one bind
        // point, and a bind point holds one name.
        let mut uniforms: Vec<(String, UniformLocation)> = Vec::new();
        for (name, loc) in uniforms_of(&vs).chain(uniforms_of(&fs)) {
            match uniforms.iter().find(|(n, l)| *n == name || *l == loc) {
                Some((n, l)) if *n == name && *l == loc => {}
                Some((n, _)) => {
                    return Err(ProgramError::UniformConflict {
                        first: n.clone(),
                        second: name,
                        group: loc.group,
                        binding: loc.binding,
                    });
                }
                None => uniforms.push((name, loc)),
            }
        }

        Ok(Self { attributes, uniforms })
    }

    /// Vertex inputs in location order.
    pub fn attributes(&self) -> &[AttributeInfo] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.iter().find(|(n, _)| n == name).map(|(_, loc)| *loc)
    }
}

fn compile_stage(stage: Stage, source: &str) -> Result<Module, ProgramError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ProgramError::Compile {
        stage,
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| ProgramError::Compile {
        stage,
        message: e.as_inner().to_string(),
    })?;

    Ok(module)
}

fn find_entry(module: &Module, stage: Stage) -> Result<&naga::EntryPoint, ProgramError> {
    let (naga_stage, name) = match stage {
        Stage::Vertex => (ShaderStage::Vertex, VERTEX_ENTRY),
        Stage::Fragment => (ShaderStage::Fragment, FRAGMENT_ENTRY),
    };

    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga_stage && ep.name == name)
        .ok_or(ProgramError::MissingEntryPoint { stage, name })
}

struct Slot {
    name: String,
    location: u32,
    ty: Handle<Type>,
}

/// `@location` slots of an argument or result: either the value itself or
/// the members of a struct carrying the bindings.
fn slots(module: &Module, name: Option<&str>, ty: Handle<Type>, binding: Option<&Binding>) -> Vec<Slot> {
    match binding {
        Some(Binding::Location { location, .. }) => vec![Slot {
            name: name.unwrap_or_default().to_string(),
            location: *location,
            ty,
        }],
        Some(Binding::BuiltIn(_)) => Vec::new(),
        None => match &module.types[ty].inner {
            TypeInner::Struct { members, .. } => members
                .iter()
                .filter_map(|m| match &m.binding {
                    Some(Binding::Location { location, .. }) => Some(Slot {
                        name: m.name.clone().unwrap_or_default(),
                        location: *location,
                        ty: m.ty,
                    }),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        },
    }
}

fn vertex_format(inner: &TypeInner) -> Option<wgpu::VertexFormat> {
    use wgpu::VertexFormat as F;

    let (kind, width, components) = match *inner {
        TypeInner::Scalar(s) => (s.kind, s.width, 1),
        TypeInner::Vector { size, scalar } => {
            let n = match size {
                VectorSize::Bi => 2,
                VectorSize::Tri => 3,
                VectorSize::Quad => 4,
            };
            (scalar.kind, scalar.width, n)
        }
        _ => return None,
    };

    if width != 4 {
        return None;
    }

    Some(match (kind, components) {
        (ScalarKind::Float, 1) => F::Float32,
        (ScalarKind::Float, 2) => F::Float32x2,
        (ScalarKind::Float, 3) => F::Float32x3,
        (ScalarKind::Float, 4) => F::Float32x4,
        (ScalarKind::Uint, 1) => F::Uint32,
        (ScalarKind::Uint, 2) => F::Uint32x2,
        (ScalarKind::Uint, 3) => F::Uint32x3,
        (ScalarKind::Uint, 4) => F::Uint32x4,
        (ScalarKind::Sint, 1) => F::Sint32,
        (ScalarKind::Sint, 2) => F::Sint32x2,
        (ScalarKind::Sint, 3) => F::Sint32x3,
        (ScalarKind::Sint, 4) => F::Sint32x4,
        _ => return None,
    })
}

fn uniforms_of(module: &Module) -> impl Iterator<Item = (String, UniformLocation)> + '_ {
    module.global_variables.iter().filter_map(|(_, var)| {
        if var.space != AddressSpace::Uniform {
            return None;
        }
        let name = var.name.clone()?;
        let rb = var.binding.as_ref()?;
        Some((
            name,
            UniformLocation {
                group: rb.group,
                binding: rb.binding,
            },
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT_VS: &str = include_str!("../shaders/point.vert.wgsl");
    const POINT_FS: &str = include_str!("../shaders/point.frag.wgsl");
    const FILL_VS: &str = include_str!("../shaders/fill.vert.wgsl");
    const FILL_FS: &str = include_str!("../shaders/fill.frag.wgsl");

    const SOLID_FS: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

    #[test]
    fn point_program_links_and_exposes_attributes() {
        let iface = ProgramInterface::validate(POINT_VS, POINT_FS).unwrap();

        let corner = iface.attribute("corner").unwrap();
        assert_eq!(corner.location, 0);
        assert_eq!(corner.format, wgpu::VertexFormat::Float32x2);

        let position = iface.attribute("position").unwrap();
        assert_eq!(position.location, 1);
        assert_eq!(position.format, wgpu::VertexFormat::Float32x2);

        assert!(iface.attribute("a_Position").is_none());
        assert_eq!(
            iface.uniform("style"),
            Some(UniformLocation { group: 0, binding: 0 })
        );
    }

    #[test]
    fn fill_program_has_no_attributes() {
        let iface = ProgramInterface::validate(FILL_VS, FILL_FS).unwrap();
        assert!(iface.attributes().is_empty());
        assert!(iface.uniform("fill").is_some());
    }

    #[test]
    fn struct_inputs_are_flattened() {
        let vs = r#"
struct In {
    @location(2) offset: vec2<f32>,
    @location(0) position: vec4<f32>,
    @builtin(vertex_index) index: u32,
};

@vertex
fn vs_main(v: In) -> @builtin(position) vec4<f32> {
    return v.position + vec4<f32>(v.offset, 0.0, 0.0);
}
"#;
        let iface = ProgramInterface::validate(vs, SOLID_FS).unwrap();
        let names: Vec<_> = iface.attributes().iter().map(|a| (a.name.as_str(), a.location)).collect();
        assert_eq!(names, vec![("position", 0), ("offset", 2)]);
        assert_eq!(iface.attribute("position").unwrap().format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn syntax_error_reports_the_stage() {
        let err = ProgramInterface::validate("@vertex fn vs_main( {", SOLID_FS).unwrap_err();
        assert!(matches!(err, ProgramError::Compile { stage: Stage::Vertex, .. }), "{err}");

        let err = ProgramInterface::validate(FILL_VS, "this is not wgsl").unwrap_err();
        assert!(matches!(err, ProgramError::Compile { stage: Stage::Fragment, .. }), "{err}");
    }

    #[test]
    fn type_error_is_a_compile_error() {
        let fs = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec3<f32>(1.0, 0.0, 0.0);
}
"#;
        let err = ProgramInterface::validate(FILL_VS, fs).unwrap_err();
        assert!(matches!(err, ProgramError::Compile { stage: Stage::Fragment, .. }), "{err}");
    }

    #[test]
    fn wrong_entry_point_name_is_rejected() {
        let fs = SOLID_FS.replace("fs_main", "main");
        let err = ProgramInterface::validate(FILL_VS, &fs).unwrap_err();
        assert_eq!(
            err,
            ProgramError::MissingEntryPoint { stage: Stage::Fragment, name: FRAGMENT_ENTRY }
        );
    }

    #[test]
    fn fragment_input_without_vertex_output_fails_to_link() {
        let fs = r#"
@fragment
fn fs_main(@location(3) tint: vec4<f32>) -> @location(0) vec4<f32> {
    return tint;
}
"#;
        let err = ProgramInterface::validate(FILL_VS, fs).unwrap_err();
        assert_eq!(err, ProgramError::Link { name: "tint".into(), location: 3 });
    }

    #[test]
    fn shared_uniform_in_both_stages_is_merged() {
        let vs = r#"
struct Tint { color: vec4<f32> };
@group(0) @binding(0) var<uniform> tint: Tint;

@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
    return tint.color * f32(i);
}
"#;
        let fs = r#"
struct Tint { color: vec4<f32> };
@group(0) @binding(0) var<uniform> tint: Tint;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return tint.color;
}
"#;
        let iface = ProgramInterface::validate(vs, fs).unwrap();
        assert_eq!(iface.uniform("tint"), Some(UniformLocation { group: 0, binding: 0 }));
    }

    #[test]
    fn two_uniforms_on_one_binding_are_rejected() {
        let vs = r#"
struct Scale { v: vec4<f32> };
@group(0) @binding(0) var<uniform> scale: Scale;

@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
    return scale.v * f32(i);
}
"#;
        let fs = r#"
struct Tint { color: vec4<f32> };
@group(0) @binding(0) var<uniform> tint: Tint;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return tint.color;
}
"#;
        let err = ProgramInterface::validate(vs, fs).unwrap_err();
        assert_eq!(
            err,
            ProgramError::UniformConflict {
                first: "scale".into(),
                second: "tint".into(),
                group: 0,
                binding: 0,
            }
        );

        let moved = fs.replace("@binding(0)", "@binding(1)").replace("tint", "scale");
        let err = ProgramInterface::validate(vs, &moved).unwrap_err();
        assert!(matches!(err, ProgramError::UniformConflict { binding: 1, .. }), "{err}");
    }

    #[test]
    fn only_numeric_scalars_and_vectors_are_attributes() {
        let vs = r#"
@vertex
fn vs_main(@location(0) m: vec2<f32>, @location(1) flag: f32) -> @builtin(position) vec4<f32> {
    return vec4<f32>(m, flag, 1.0);
}
"#;
        // Scalars and vectors are fine.
        assert!(ProgramInterface::validate(vs, SOLID_FS).is_ok());
        assert_eq!(vertex_format(&TypeInner::Scalar(naga::Scalar::BOOL)), None);
    }
}
