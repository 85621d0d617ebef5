pub mod city;
pub mod config;
pub mod generator;
pub mod rng;
pub mod sim;
pub mod spatial;

#[cfg(test)]
mod test;
