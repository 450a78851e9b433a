//! Beam model - the main entry point for building and solving a beam

use serde::{Deserialize, Serialize};

use crate::analysis::{
    build_global_stiffness, build_load_vector, solve_reduced, DofPartition, SolverOptions,
};
use crate::elements::Reaction;
use crate::error::{BeamError, BeamResult, ValidationError};
use crate::loads::Load;
use crate::math::Vec as FEVec;
use crate::mesh::Mesh;
use crate::response::{Estimate, ResponseField, ResponseKind};
use crate::results::{AnalysisSummary, NodeDisplacement, ReactionResult};

/// Samples per element used by the extreme search in [`Beam::summary`]
const SUMMARY_SAMPLES: usize = 20;

/// Lifecycle of the cached analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamState {
    /// Nothing cached for the current inputs
    Unbuilt,
    /// Mesh built, not solved
    Meshed,
    /// Reactions and response available
    Solved,
}

#[derive(Debug, Clone)]
struct CachedMesh {
    generation: u64,
    mesh: Mesh,
}

#[derive(Debug, Clone)]
struct SolvedState {
    generation: u64,
    displacements: FEVec,
    free_dofs: usize,
    condition: f64,
    field: ResponseField,
}

/// A straight beam with point loads and supports
#[derive(Debug, Clone)]
pub struct Beam {
    length: f64,
    e: f64,
    ixx: f64,
    loads: Vec<Load>,
    reactions: Vec<Reaction>,
    options: SolverOptions,

    /// Bumped by every mutation
    generation: u64,
    mesh: Option<CachedMesh>,
    solved: Option<SolvedState>,
}

impl Beam {
    /// Create a beam with unit modulus and inertia
    pub fn new(length: f64, loads: Vec<Load>, reactions: Vec<Reaction>) -> BeamResult<Self> {
        Self::with_properties(length, 1.0, 1.0, loads, reactions)
    }

    /// Create a beam with all properties given
    pub fn with_properties(
        length: f64,
        e: f64,
        ixx: f64,
        loads: Vec<Load>,
        reactions: Vec<Reaction>,
    ) -> BeamResult<Self> {
        validate_length(length)?;
        validate_modulus(e)?;
        validate_inertia(ixx)?;
        validate_loads(&loads, length)?;
        validate_reactions(&reactions, length)?;

        let mut reactions = reactions;
        reactions.iter_mut().for_each(Reaction::invalidate);

        Ok(Self {
            length,
            e,
            ixx,
            loads,
            reactions,
            options: SolverOptions::default(),
            generation: 0,
            mesh: None,
            solved: None,
        })
    }

    /// Set Young's modulus
    pub fn with_modulus(mut self, e: f64) -> BeamResult<Self> {
        self.set_modulus(e)?;
        Ok(self)
    }

    /// Set the area moment of inertia
    pub fn with_inertia(mut self, ixx: f64) -> BeamResult<Self> {
        self.set_inertia(ixx)?;
        Ok(self)
    }

    /// Replace the solver options
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.set_options(options);
        self
    }

    // ========================
    // Inputs
    // ========================

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn modulus(&self) -> f64 {
        self.e
    }

    pub fn inertia(&self) -> f64 {
        self.ixx
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// Supports as given. Their solved values are only populated while the
    /// beam is solved; see [`Beam::reactions`].
    pub fn supports(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Mutation counter
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_length(&mut self, length: f64) -> BeamResult<()> {
        validate_length(length)?;
        validate_loads(&self.loads, length)?;
        validate_reactions(&self.reactions, length)?;
        self.length = length;
        self.invalidate();
        Ok(())
    }

    pub fn set_modulus(&mut self, e: f64) -> BeamResult<()> {
        validate_modulus(e)?;
        self.e = e;
        self.invalidate();
        Ok(())
    }

    pub fn set_inertia(&mut self, ixx: f64) -> BeamResult<()> {
        validate_inertia(ixx)?;
        self.ixx = ixx;
        self.invalidate();
        Ok(())
    }

    pub fn set_loads(&mut self, loads: Vec<Load>) -> BeamResult<()> {
        validate_loads(&loads, self.length)?;
        self.loads = loads;
        self.invalidate();
        Ok(())
    }

    pub fn set_reactions(&mut self, reactions: Vec<Reaction>) -> BeamResult<()> {
        validate_reactions(&reactions, self.length)?;
        self.reactions = reactions;
        self.invalidate();
        Ok(())
    }

    pub fn add_load(&mut self, load: Load) -> BeamResult<()> {
        validate_loads(std::slice::from_ref(&load), self.length)?;
        self.loads.push(load);
        self.invalidate();
        Ok(())
    }

    pub fn add_reaction(&mut self, reaction: Reaction) -> BeamResult<()> {
        validate_reactions(std::slice::from_ref(&reaction), self.length)?;
        self.reactions.push(reaction);
        self.invalidate();
        Ok(())
    }

    pub fn set_options(&mut self, options: SolverOptions) {
        self.options = options;
        self.invalidate();
    }

    /// Discard the mesh and any solved results
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.mesh = None;
        self.solved = None;
        self.reactions.iter_mut().for_each(Reaction::invalidate);
    }

    // ========================
    // Analysis
    // ========================

    pub fn state(&self) -> BeamState {
        if self.solved_state().is_ok() {
            BeamState::Solved
        } else if matches!(&self.mesh, Some(c) if c.generation == self.generation) {
            BeamState::Meshed
        } else {
            BeamState::Unbuilt
        }
    }

    /// Mesh for the current inputs, built on first use
    pub fn mesh(&mut self) -> BeamResult<&Mesh> {
        let generation = self.generation;
        let cached = match self.mesh.take() {
            Some(cached) if cached.generation == generation => cached,
            _ => CachedMesh {
                generation,
                mesh: self.build_mesh()?,
            },
        };
        Ok(&self.mesh.insert(cached).mesh)
    }

    fn build_mesh(&self) -> Result<Mesh, ValidationError> {
        let locations = self
            .loads
            .iter()
            .map(Load::location)
            .chain(self.reactions.iter().map(Reaction::location));
        Mesh::build(
            self.length,
            self.e,
            self.ixx,
            locations,
            self.options.merge_tolerance,
        )
    }

    /// Solve for reactions and nodal displacements.
    ///
    /// Does nothing if the beam is already solved. On failure the beam is
    /// left unsolved with every reaction value unknown.
    pub fn solve(&mut self) -> BeamResult<()> {
        if self.solved_state().is_ok() {
            log::debug!("beam already solved at generation {}", self.generation);
            return Ok(());
        }

        let generation = self.generation;
        let options = self.options;
        let mesh = self.mesh()?.clone();

        let k_global = build_global_stiffness(&mesh);
        let p_global = build_load_vector(&mesh, &self.loads)?;
        let partition = DofPartition::from_reactions(&mesh, &self.reactions)?;
        let solution = solve_reduced(&k_global, &p_global, &partition, &options)?;

        // Reaction values per support, as (force, moment)
        let mut values = Vec::with_capacity(self.reactions.len());
        let mut actions = self.loads.clone();
        for reaction in &self.reactions {
            let node = mesh
                .node_index(reaction.location())
                .ok_or(ValidationError::LocationOutOfRange {
                    location: reaction.location(),
                    length: self.length,
                })?;
            let force = solution.residual[node * 2];
            let moment = solution.residual[node * 2 + 1];

            let bc = reaction.boundary_condition();
            if bc.disp_fixed {
                actions.push(Load::point(force, reaction.location()));
            }
            if bc.rot_fixed {
                actions.push(Load::moment(moment, reaction.location()));
            }
            values.push((force, moment));
        }

        log::info!(
            "solved beam: {} elements, {} free DOFs, condition {:.3e}",
            mesh.num_elements(),
            partition.free.len(),
            solution.condition
        );

        let field = ResponseField::new(
            mesh,
            self.ixx,
            &solution.displacements,
            &actions,
            &options,
        )?;

        for (reaction, (force, moment)) in self.reactions.iter_mut().zip(values) {
            reaction.set_solved(force, moment);
        }

        self.solved = Some(SolvedState {
            generation,
            displacements: solution.displacements,
            free_dofs: partition.free.len(),
            condition: solution.condition,
            field,
        });

        Ok(())
    }

    fn solved_state(&self) -> BeamResult<&SolvedState> {
        self.solved
            .as_ref()
            .filter(|s| s.generation == self.generation)
            .ok_or(BeamError::NotSolved)
    }

    pub fn is_solved(&self) -> bool {
        self.solved_state().is_ok()
    }

    // ========================
    // Result Access Methods
    // ========================

    /// Supports with their solved force and moment.
    ///
    /// A support that leaves rotation free keeps `moment()` as `None`, while
    /// [`Beam::reaction_moment`] reports `0.0` for it.
    pub fn reactions(&self) -> BeamResult<&[Reaction]> {
        self.solved_state()?;
        Ok(&self.reactions)
    }

    fn solved_reaction(&self, index: usize) -> BeamResult<&Reaction> {
        self.reactions()?
            .get(index)
            .ok_or(BeamError::ReactionNotFound {
                index,
                count: self.reactions.len(),
            })
    }

    /// Solved force of the reaction at `index`
    pub fn reaction_force(&self, index: usize) -> BeamResult<f64> {
        self.solved_reaction(index)?
            .force()
            .ok_or(BeamError::NotSolved)
    }

    /// Solved moment of the reaction at `index`; `0.0` for a support that
    /// leaves rotation free
    pub fn reaction_moment(&self, index: usize) -> BeamResult<f64> {
        Ok(self.solved_reaction(index)?.moment().unwrap_or(0.0))
    }

    /// Serializable snapshot of every reaction
    pub fn reaction_results(&self) -> BeamResult<Vec<ReactionResult>> {
        self.reactions()?
            .iter()
            .map(|r| ReactionResult::from_reaction(r).ok_or(BeamError::NotSolved))
            .collect()
    }

    /// Solved displacement and rotation of every node
    pub fn node_displacements(&self) -> BeamResult<Vec<NodeDisplacement>> {
        let solved = self.solved_state()?;
        Ok(solved
            .field
            .mesh()
            .nodes()
            .iter()
            .map(|n| {
                NodeDisplacement::from_array(
                    n.x,
                    [
                        solved.displacements[n.displacement_dof()],
                        solved.displacements[n.rotation_dof()],
                    ],
                )
            })
            .collect())
    }

    pub fn response(&self) -> BeamResult<&ResponseField> {
        Ok(&self.solved_state()?.field)
    }

    pub fn shear(&self, x: f64) -> BeamResult<f64> {
        Ok(self.response()?.shear(x)?)
    }

    pub fn moment(&self, x: f64) -> BeamResult<f64> {
        Ok(self.response()?.moment(x)?)
    }

    pub fn slope(&self, x: f64) -> BeamResult<f64> {
        Ok(self.response()?.slope(x)?)
    }

    pub fn deflection(&self, x: f64) -> BeamResult<f64> {
        Ok(self.response()?.deflection(x)?)
    }

    pub fn shear_many(&self, xs: &[f64]) -> BeamResult<Vec<f64>> {
        Ok(self.response()?.shear_many(xs)?)
    }

    pub fn moment_many(&self, xs: &[f64]) -> BeamResult<Vec<f64>> {
        Ok(self.response()?.moment_many(xs)?)
    }

    pub fn slope_many(&self, xs: &[f64]) -> BeamResult<Vec<f64>> {
        Ok(self.response()?.slope_many(xs)?)
    }

    pub fn deflection_many(&self, xs: &[f64]) -> BeamResult<Vec<f64>> {
        Ok(self.response()?.deflection_many(xs)?)
    }

    /// Bending stress at `x` for a fibre `c` from the neutral axis
    pub fn bending_stress(&self, x: f64, c: f64) -> BeamResult<f64> {
        Ok(self.response()?.bending_stress(x, c)?)
    }

    /// Numeric derivative of a response quantity
    pub fn derivative(&self, kind: ResponseKind, x: f64, order: u8) -> BeamResult<Estimate> {
        Ok(self.response()?.derivative(kind, x, order)?)
    }

    /// Get analysis summary
    pub fn summary(&self) -> BeamResult<AnalysisSummary> {
        let solved = self.solved_state()?;
        let field = &solved.field;

        Ok(AnalysisSummary {
            max_deflection: field.extreme(ResponseKind::Deflection, SUMMARY_SAMPLES),
            max_slope: field.extreme(ResponseKind::Slope, SUMMARY_SAMPLES),
            max_moment: field.extreme(ResponseKind::Moment, SUMMARY_SAMPLES),
            max_shear: field.extreme(ResponseKind::Shear, SUMMARY_SAMPLES),
            reactions: self.reaction_results()?,
            num_nodes: field.mesh().nodes().len(),
            num_elements: field.mesh().num_elements(),
            total_dofs: field.mesh().dof(),
            free_dofs: solved.free_dofs,
            condition: solved.condition,
            nodal_mismatch: field.mismatch(),
        })
    }
}

fn validate_length(length: f64) -> Result<(), ValidationError> {
    if length.is_finite() && length > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveLength(length))
    }
}

fn validate_modulus(e: f64) -> Result<(), ValidationError> {
    if e.is_finite() && e > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveModulus(e))
    }
}

fn validate_inertia(ixx: f64) -> Result<(), ValidationError> {
    if ixx.is_finite() && ixx > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveInertia(ixx))
    }
}

fn validate_location(location: f64, length: f64) -> Result<(), ValidationError> {
    if location.is_finite() && (0.0..=length).contains(&location) {
        Ok(())
    } else {
        Err(ValidationError::LocationOutOfRange { location, length })
    }
}

fn validate_loads(loads: &[Load], length: f64) -> Result<(), ValidationError> {
    for load in loads {
        if !load.magnitude().is_finite() {
            return Err(ValidationError::NonFiniteMagnitude(load.magnitude()));
        }
        validate_location(load.location(), length)?;
    }
    Ok(())
}

fn validate_reactions(reactions: &[Reaction], length: f64) -> Result<(), ValidationError> {
    reactions
        .iter()
        .try_for_each(|r| validate_location(r.location(), length))
}
