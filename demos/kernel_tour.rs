//! Kernel Tour for matkern
//!
//! Walks through every kernel on small matrices and prints each result:
//! - Valid-mode convolution of a random input with a random kernel
//! - Tiled multiplication and the transpose identity (AB)ᵀ = BᵀAᵀ
//! - Modular inverse (mod 7) and its identity check
//! - Chain product of four matrices
//! - 2D prefix sum
//!
//! Run with: cargo run --example kernel_tour
//! Add `--features tracing` and `RUST_LOG=debug` to see kernel spans.

use matkern::{chain_product, Matrix};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    // ========================================================================
    // Convolution
    // ========================================================================
    let mut input_rng = StdRng::seed_from_u64(0);
    let mut kernel_rng = StdRng::seed_from_u64(314_159);

    let input = Matrix::from_fn(4, 4, |_, _| input_rng.random_range(0..5))?;
    let kernel = Matrix::from_fn(3, 3, |_, _| kernel_rng.random_range(0..5))?;
    let output = input.convolve2d(&kernel)?;

    println!("====================");
    print!("Input: {input}");
    print!("Kernel: {kernel}");
    print!("Output: {output}");

    // ========================================================================
    // Multiplication and transpose
    // ========================================================================
    let a = Matrix::from_fn(4, 2, |r, c| (r + c) as i32)?;
    let mut counter = 0;
    let b = Matrix::from_fn(2, 6, |_, _| {
        counter += 1;
        counter - 1
    })?;
    let prod = a.matmul(&b)?;

    println!("====================");
    print!("A: {a}");
    print!("B: {b}");
    print!("A x B: {prod}");

    let at = a.transpose();
    let bt = b.transpose();
    let prod_t = prod.transpose();
    let prod_ot = bt.matmul(&at)?;

    println!("====================");
    print!("A^T: {at}");
    print!("B^T: {bt}");
    print!("(A x B)^T: {prod_t}");
    print!("B^T x A^T: {prod_ot}");

    println!("A == B? {}", a == b);
    println!("A == A^T? {}", a == at);
    println!("(A x B)^T == B^T x A^T? {}", prod_t == prod_ot);

    // ========================================================================
    // Modular inverse
    // ========================================================================
    let m = Matrix::from_fn(2, 2, |r, c| (c + 2 * r + 1) as i32)?;
    let inv = m.mod_inverse(7)?;
    let id = m.matmul(&inv)?.mod_reduce(7)?;

    println!("====================");
    print!("M: {m}");
    print!("M^-1: {inv}");
    print!("M M^-1 (mod 7): {id}");

    // ========================================================================
    // Chain product
    // ========================================================================
    let m1 = Matrix::from_fn(3, 3, |r, c| (r + c) as i32)?;
    let m2 = Matrix::from_fn(3, 3, |r, c| (r * c) as i32)?;
    let m3 = Matrix::from_fn(3, 3, |r, c| (r % (c + 1)) as i32)?;
    let m4 = Matrix::from_fn(3, 3, |r, c| (c % (r + 1)) as i32)?;

    let res = chain_product(&[m1, m2, m3, m4])?;
    println!("====================");
    print!("Product: {res}");

    // ========================================================================
    // Prefix sum
    // ========================================================================
    let ones = Matrix::from_fn(3, 4, |_, _| 1)?;
    println!("====================");
    print!("Prefix sum of ones: {}", ones.prefix_sum_2d());
    println!("====================");

    Ok(())
}
