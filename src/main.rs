// Headless demo: train on the shipped dataset, report held-out accuracy,
// classify one sample record.
use medipredict::DATA_FILEPATH;
use medipredict::schema::FieldSchema;
use medipredict::session::{Session, TrainConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TrainConfig::default();
    let session = Session::train(DATA_FILEPATH, FieldSchema::clinical(), &config)?;

    println!("held-out accuracy: {:.3}", session.held_out_accuracy());

    let sample = ["2", "120", "70", "25", "80", "28.5", "0.45", "33"];
    let risk = session.predict(&sample)?;
    println!("sample prediction: {risk}");

    Ok(())
}
