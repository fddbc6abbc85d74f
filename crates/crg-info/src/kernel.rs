use crg_core::Network;
use nalgebra::DMatrix;

/// Builds the random-walk transition kernel of `graph`.
///
/// Row `i` is the adjacency row of node `i` divided by its degree. Isolated
/// nodes keep an all-zero row, so every row sums to either 1 or 0.
pub fn build_transition_kernel(graph: &dyn Network) -> DMatrix<f64> {
    let mut kernel = graph.adjacency_matrix();
    for mut row in kernel.row_iter_mut() {
        let degree: f64 = row.sum();
        if degree > 0.0 {
            for value in row.iter_mut() {
                *value /= degree;
            }
        }
    }
    kernel
}
