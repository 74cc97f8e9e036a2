//! Objects of the test scene.

use std::sync::Arc;

use ultraviolet::{Rotor3, Vec3};

use reng_core::asset::MaterialDefinition;
use reng_core::component::{
    Camera, CameraComponent, LightComponent, RenderableComponent, SpinComponent,
    TransformComponent, VertexColorComponent,
};
use reng_core::error::Result;
use reng_core::import::{MaterialTextures, MeshNode, MeshScene};
use reng_core::mesh::{Mesh, VertexAttribute};
use reng_core::prims;
use reng_core::transform::Transform;
use reng_core::Engine;

/// Vertex of the model: position, normal and texture coordinates.
const MODEL_STRIDE: usize = 8;

/// Fills the engine with all objects of the test scene.
pub fn build(engine: &mut Engine) -> Result<()> {
    engine.register_update_component::<CameraComponent>();
    engine.register_update_component::<SpinComponent>();
    engine.register_update_component::<VertexColorComponent>();

    add_camera(engine)?;
    add_light(engine)?;

    add_textured_quad(engine, Vec3::zero())?;
    add_spinning_tri(engine, Vec3::new(-2.0, 1.0, 0.0))?;
    add_spinning_tri(engine, Vec3::new(2.0, 1.0, 0.0))?;
    add_vertex_colored_cube(engine, Vec3::new(3.0, 2.0, 3.0))?;
    add_lit_cube(engine, Vec3::zero())?;
    add_model(engine, Vec3::new(2.0, -2.0, 3.0))?;
    Ok(())
}

fn add_camera(engine: &mut Engine) -> Result<()> {
    let mut transform = Transform::new(Vec3::new(0.0, 20.0, 20.0));
    transform.look_at(Vec3::zero());

    let mut entity = engine.emplace_entity("Camera");
    let transform = entity.emplace_component(TransformComponent::new(transform))?;
    let camera = Camera::new(45.0, 16.0 / 9.0, 0.1, 100.0);
    entity.emplace_component(CameraComponent::new(transform, camera))?;
    Ok(())
}

fn add_light(engine: &mut Engine) -> Result<()> {
    let mut transform = Transform::new(Vec3::new(-50.0, 50.0, 50.0));
    transform.look_at(Vec3::zero());

    let mut entity = engine.emplace_entity("Light");
    let transform = entity.emplace_component(TransformComponent::new(transform))?;
    entity.emplace_component(LightComponent::new(transform))?;
    Ok(())
}

fn add_textured_quad(engine: &mut Engine, position: Vec3) -> Result<()> {
    let definition = MaterialDefinition::new("shaders/TexCoord.vert", "shaders/Textured.frag")
        .with_texture("textures/pebbles.png");
    let material = engine.assets_mut().load_material(&definition)?;
    let mesh = Mesh::new(
        prims::QUAD_VERTICES_AND_UVS,
        5,
        VertexAttribute::POSITION_UV,
        Some(prims::QUAD_INDICES.to_vec()),
    )?;

    let rotation = Rotor3::from_rotation_yz(std::f32::consts::FRAC_PI_2);
    let transform = Transform::from_trs(position, rotation, 3.0);
    let mut entity = engine.emplace_entity("Textured Quad");
    let transform = entity.emplace_component(TransformComponent::new(transform))?;
    entity.emplace_component(RenderableComponent::new(transform, Arc::new(mesh), material))?;
    Ok(())
}

fn add_spinning_tri(engine: &mut Engine, position: Vec3) -> Result<()> {
    let definition = MaterialDefinition::new("shaders/Default.vert", "shaders/Red.frag");
    let material = engine.assets_mut().load_material(&definition)?;
    let mesh = Mesh::new(prims::TRIANGLE_VERTICES, 3, VertexAttribute::POSITION, None)?;

    let mut entity = engine.emplace_entity("Spinning Tri");
    let transform = entity.emplace_component(TransformComponent::from(position))?;
    entity.emplace_component(RenderableComponent::new(transform, Arc::new(mesh), material))?;
    entity.emplace_component(SpinComponent::new(transform, 10.0))?;
    Ok(())
}

fn add_vertex_colored_cube(engine: &mut Engine, position: Vec3) -> Result<()> {
    let definition = MaterialDefinition::new("shaders/Color.vert", "shaders/VertexColor.frag");
    let material = engine.assets_mut().load_material(&definition)?;
    let mesh = Mesh::new(
        prims::CUBE_VERTICES,
        3,
        VertexAttribute::POSITION,
        Some(prims::CUBE_INDICES.to_vec()),
    )?;

    let mut entity = engine.emplace_entity("Vert Colored Cube");
    let transform = entity.emplace_component(TransformComponent::from(position))?;
    entity.emplace_component(RenderableComponent::new(transform, Arc::new(mesh), material))?;
    entity.emplace_component(VertexColorComponent::new(prims::CUBE_COLORS))?;
    Ok(())
}

fn add_lit_cube(engine: &mut Engine, position: Vec3) -> Result<()> {
    let definition = MaterialDefinition::new("shaders/Normal.vert", "shaders/VertexLit.frag");
    let mut material = (*engine.assets_mut().load_material(&definition)?).clone();
    material.set_specular_power(2.0);
    let mesh = Mesh::new(
        prims::CUBE_VERTICES_AND_NORMALS,
        6,
        VertexAttribute::POSITION_NORMAL,
        Some(prims::CUBE_INDICES.to_vec()),
    )?;

    let mut entity = engine.emplace_entity("Lit Cube");
    let transform = entity.emplace_component(TransformComponent::from(position))?;
    let renderable = RenderableComponent::new(transform, Arc::new(mesh), Arc::new(material));
    entity.emplace_component(renderable)?;
    Ok(())
}

fn add_model(engine: &mut Engine, position: Vec3) -> Result<()> {
    let definition = MaterialDefinition::new(
        "shaders/TexCoordNormalTangent.vert",
        "shaders/TexturedNormalLit.frag",
    );
    let material = engine.assets_mut().load_material(&definition)?;

    let textures = MaterialTextures {
        diffuse: Some("textures/pebbles.png".into()),
        normal: Some("textures/pebbles_normal.png".into()),
    };
    let hull = model_node(
        "Hull",
        &prims::CUBE_VERTICES_AND_NORMALS,
        6,
        &prims::CUBE_INDICES,
        vec![textures.clone()],
    );
    let plate = model_node(
        "Plate",
        &prims::QUAD_VERTICES_AND_UVS,
        5,
        &prims::QUAD_INDICES,
        vec![textures],
    );
    let scene = MeshScene::new(vec![hull, plate]);
    engine.add_model("Model", position, &scene, &material)?;
    Ok(())
}

/// Converts vertices of a primitive into the layout of model vertices.
fn model_node(
    name: &str,
    vertices: &[f32],
    stride: usize,
    indices: &[u32],
    materials: Vec<MaterialTextures>,
) -> MeshNode {
    let vertices = vertices
        .chunks(stride)
        .flat_map(|vertex| {
            let position = &vertex[..3];
            let normal: &[f32] = if stride == 6 { &vertex[3..6] } else { &[0.0, 0.0, 1.0] };
            let uv: &[f32] = if stride == 5 { &vertex[3..5] } else { &[0.0, 0.0] };
            position.iter().chain(normal).chain(uv).copied().collect::<Vec<_>>()
        })
        .collect();
    MeshNode {
        name: name.to_string(),
        vertices,
        stride: MODEL_STRIDE,
        attributes: vec![
            VertexAttribute::new(0, 3),
            VertexAttribute::new(3, 3),
            VertexAttribute::new(6, 2),
        ],
        indices: indices.to_vec(),
        materials,
    }
}
