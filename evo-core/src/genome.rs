use evo_types::{Gene, Genome};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub fn random_gene(rng: &mut ChaCha8Rng) -> Gene {
    Gene::decode(rng.random::<u32>())
}

pub fn random_genome(gene_count: usize, rng: &mut ChaCha8Rng) -> Genome {
    Genome::new((0..gene_count).map(|_| random_gene(rng)).collect())
}

/// Flips each of the 32 packed bits independently with probability
/// `rate`, then re-decodes. Every bit rolls the generator once, whether
/// or not it flips, so the draw count per gene is fixed.
pub fn mutate_gene(gene: &mut Gene, rate: f32, rng: &mut ChaCha8Rng) {
    let mut packed = gene.encode();
    for bit in 0..32 {
        if rng.random::<f32>() < rate {
            packed ^= 1 << bit;
        }
    }
    *gene = Gene::decode(packed);
}

pub fn mutate_genome(genome: &mut Genome, rate: f32, rng: &mut ChaCha8Rng) {
    for gene in &mut genome.genes {
        mutate_gene(gene, rate, rng);
    }
}

/// Genome similarity in [0, 1]: one minus the Hamming distance between
/// the packed gene streams, over the longer genome's bit length.
/// Positions missing from the shorter genome count as fully different.
pub fn similarity(a: &Genome, b: &Genome) -> f32 {
    let overlap = a.len().min(b.len());
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let mut differing_bits = ((longest - overlap) as u64) * 32;
    for i in 0..overlap {
        differing_bits += u64::from((a.genes[i].encode() ^ b.genes[i].encode()).count_ones());
    }
    1.0 - differing_bits as f32 / (longest as f32 * 32.0)
}

/// Single-point crossover. The child length is the floored mean of the
/// parents' lengths; genes before the point come from the first parent,
/// the rest from the second. A parent too short to supply a position
/// contributes a fresh random gene instead.
pub fn crossover(parent1: &Genome, parent2: &Genome, rng: &mut ChaCha8Rng) -> Genome {
    let child_len = (parent1.len() + parent2.len()) / 2;
    if child_len == 0 {
        return Genome::new(Vec::new());
    }
    let point = rng.random_range(0..child_len);

    let mut genes = Vec::with_capacity(child_len);
    for i in 0..child_len {
        let source = if i < point { parent1 } else { parent2 };
        let gene = match source.genes.get(i) {
            Some(gene) => *gene,
            None => random_gene(rng),
        };
        genes.push(gene);
    }
    Genome::new(genes)
}
