fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the proto file for the rating predictor client
    tonic_build::compile_protos("../../proto/rating.proto")?;
    Ok(())
}
