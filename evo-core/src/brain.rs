use evo_types::{Genome, SinkKind, SourceKind};

pub const NUM_SENSORS: usize = 21;
pub const NUM_ACTIONS: usize = 16;

/// Raw gene weights are i16; dividing by this puts a full-scale weight
/// at roughly +/-4.
const WEIGHT_SCALE: f32 = 8192.0;

/// One wired connection after renumbering. Indices are already reduced
/// into the sensor, neuron, or action range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source_kind: SourceKind,
    pub source_index: usize,
    pub sink_kind: SinkKind,
    pub sink_index: usize,
    pub weight: i16,
}

/// A compiled recurrent network. Neuron outputs persist between calls
/// to `evaluate`, so a neuron-to-neuron connection carries last tick's
/// value; a fresh brain reads all neurons as zero.
#[derive(Debug, Clone)]
pub struct Brain {
    connections: Vec<Connection>,
    neuron_outputs: Vec<f32>,
    neuron_inputs: Vec<f32>,
}

impl Brain {
    /// Translates a genome into connections. Source and sink numbers are
    /// reduced modulo the matching index space, then connections feeding
    /// neurons that never act as a source are pruned, repeating until a
    /// fixpoint. Neuron groups that loop back on themselves survive the
    /// pruning. Gene order is preserved among the survivors. With zero
    /// neuron capacity only direct sensor-to-action wiring remains.
    pub fn compile(genome: &Genome, max_internal_neurons: usize) -> Self {
        let mut connections: Vec<Connection> = genome
            .genes
            .iter()
            .filter(|gene| {
                max_internal_neurons > 0
                    || (gene.source_kind == SourceKind::Sensor
                        && gene.sink_kind == SinkKind::Action)
            })
            .map(|gene| Connection {
                source_kind: gene.source_kind,
                source_index: match gene.source_kind {
                    SourceKind::Sensor => gene.source_num as usize % NUM_SENSORS,
                    SourceKind::Neuron => gene.source_num as usize % max_internal_neurons,
                },
                sink_kind: gene.sink_kind,
                sink_index: match gene.sink_kind {
                    SinkKind::Neuron => gene.sink_num as usize % max_internal_neurons,
                    SinkKind::Action => gene.sink_num as usize % NUM_ACTIONS,
                },
                weight: gene.weight,
            })
            .collect();

        // A neuron with no outgoing connection can never influence an
        // action, so wiring into it is dead. Removing that wiring can
        // orphan further neurons upstream, hence the loop.
        loop {
            let mut has_outputs = vec![false; max_internal_neurons];
            for conn in &connections {
                if conn.source_kind == SourceKind::Neuron {
                    has_outputs[conn.source_index] = true;
                }
            }

            let before = connections.len();
            connections.retain(|conn| {
                conn.sink_kind != SinkKind::Neuron || has_outputs[conn.sink_index]
            });
            if connections.len() == before {
                break;
            }
        }

        Self {
            connections,
            neuron_outputs: vec![0.0; max_internal_neurons],
            neuron_inputs: vec![0.0; max_internal_neurons],
        }
    }

    /// One network pass. Action outputs are raw weighted sums; neuron
    /// sums are squashed through tanh and written back only after every
    /// connection has read the previous outputs.
    pub fn evaluate(&mut self, sensors: &[f32; NUM_SENSORS]) -> [f32; NUM_ACTIONS] {
        let mut actions = [0.0f32; NUM_ACTIONS];
        self.neuron_inputs.fill(0.0);

        for conn in &self.connections {
            let input = match conn.source_kind {
                SourceKind::Sensor => sensors[conn.source_index],
                SourceKind::Neuron => self.neuron_outputs[conn.source_index],
            };
            let weighted = input * f32::from(conn.weight) / WEIGHT_SCALE;
            match conn.sink_kind {
                SinkKind::Action => actions[conn.sink_index] += weighted,
                SinkKind::Neuron => self.neuron_inputs[conn.sink_index] += weighted,
            }
        }

        for (output, input) in self.neuron_outputs.iter_mut().zip(&self.neuron_inputs) {
            *output = input.tanh();
        }

        actions
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Distinct internal neurons referenced by the surviving wiring.
    pub fn neuron_count(&self) -> usize {
        let mut used = vec![false; self.neuron_outputs.len()];
        for conn in &self.connections {
            if conn.source_kind == SourceKind::Neuron {
                used[conn.source_index] = true;
            }
            if conn.sink_kind == SinkKind::Neuron {
                used[conn.sink_index] = true;
            }
        }
        used.iter().filter(|&&u| u).count()
    }
}
