use crate::atoms::new::Atoms;

impl Atoms {
    /// Folds every position into the primary cell.
    pub fn wrap_positions(&mut self) {
        let sim_box = &self.sim_box;
        for r_i in self.positions.as_matrix_mut().column_iter_mut() {
            sim_box.wrap_position(r_i);
        }
    }
}
