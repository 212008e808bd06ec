mod cli;

use clap::Parser;
use cli::{initialize_tracing, Cli};
use stripbake::{
    bake, layout_lods, source::obj::ObjSource, Bake, Emit, HlslEmitter, SpaceTransform,
};

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_filter, cli.log_format);

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "bake failed");
        return Err(e);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let winding = cli.winding.into();
    let bakes = cli
        .lods
        .iter()
        .enumerate()
        .map(|(lod, spec)| {
            let source = ObjSource::load(&spec.path)?;
            let res = bake(&source, &spec.config(winding))?;
            tracing::info!(
                lod,
                path = %spec.path.display(),
                strips = %res.length_distribution(),
                instances = res.instances().len(),
                "baked level of detail"
            );
            Ok(res)
        })
        .collect::<stripbake::Result<Vec<Bake>>>()?;

    let transform = SpaceTransform::from_scale_translation(cli.mesh_scale.vector, cli.translation);
    let buffer = layout_lods(&bakes, &transform)?;
    tracing::info!(
        vertices = buffer.vertices().len(),
        instances = buffer.instance_count(),
        vertices_per_instance = buffer.max_vertices_per_instance(),
        "laid out buffer"
    );

    let hlsl = HlslEmitter.emit_string(&buffer);
    match &cli.output {
        Some(path) => std::fs::write(path, hlsl)?,
        None => print!("{hlsl}"),
    }
    Ok(())
}
