//! Basic example demonstrating lloyd-kmeans usage
//!
//! Run with: cargo run --example basic --release

use lloyd_kmeans::{InitStrategy, KMeans, KMeansConfig, LogReporter, Observation};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("=== lloyd-kmeans example ===\n");

    // Generate synthetic data: 3 labelled clusters in 2D for easy visualization
    let n_samples = 300;
    let n_features = 2;
    let n_clusters = 3;

    println!("Generating {} samples with {} features...", n_samples, n_features);

    // Cluster centers
    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise = Array2::random((n_samples, n_features), Uniform::new(-1.0, 1.0));

    let observations: Vec<Observation> = (0..n_samples)
        .map(|i| {
            let cluster_idx = i % 3;
            Observation::labelled(
                vec![
                    centers[cluster_idx][0] + noise[[i, 0]],
                    centers[cluster_idx][1] + noise[[i, 1]],
                ],
                format!("blob {}", cluster_idx),
            )
        })
        .collect();

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    // Configure and run k-means
    let config = KMeansConfig::new(n_clusters)
        .with_seed(42)
        .with_init(InitStrategy::SampleBased)
        .with_purity(true);

    println!("Running k-means with k={}...\n", n_clusters);

    let mut kmeans = KMeans::with_config(n_features, config);
    kmeans
        .fit_with_reporter(observations, &mut LogReporter)
        .expect("Training failed");

    // Print learned centroids
    println!("\nLearned centroids ({:?}):", kmeans.status().unwrap());
    for centroid in kmeans.centroids().unwrap() {
        println!(
            "  {}: ({:.4}, {:.4}) with {} samples ({:.1}%)",
            centroid.name(),
            centroid.coordinates()[0],
            centroid.coordinates()[1],
            centroid.len(),
            (centroid.len() as f64 / n_samples as f64) * 100.0
        );
    }
    println!();

    // Predict labels for a few new points
    let queries = vec![
        Observation::new(vec![-4.0, -4.5]),
        Observation::new(vec![0.5, 4.0]),
        Observation::new(vec![6.0, -5.5]),
    ];
    let labels = kmeans.predict(&queries).expect("Prediction failed");

    println!("Probe assignments:");
    for (query, label) in queries.iter().zip(labels.iter()) {
        println!(
            "  ({:.2}, {:.2}) -> cluster {}",
            query.coordinates()[0],
            query.coordinates()[1],
            label
        );
    }

    println!("\n=== Done! ===");
}
