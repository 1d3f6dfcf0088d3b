use gl::types::*;

pub struct Query {
    id: GLuint,
}

impl Query {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe { gl::GenQueries(1, &mut id) };
        Self { id }
    }

    pub fn id(&self) -> GLuint { self.id }

    /// Runs `draw` between `glBeginQuery(target)` and `glEndQuery(target)`.
    pub fn measure<F: FnOnce()>(&self, target: GLenum, draw: F) {
        unsafe { gl::BeginQuery(target, self.id) };
        draw();
        unsafe { gl::EndQuery(target) };
    }

    pub fn available(&self) -> bool {
        let mut available = 0;
        unsafe { gl::GetQueryObjectuiv(self.id, gl::QUERY_RESULT_AVAILABLE, &mut available) };
        available != 0
    }

    /// Blocks until the result is ready.
    pub fn result(&self) -> u32 {
        let mut result = 0;
        unsafe { gl::GetQueryObjectuiv(self.id, gl::QUERY_RESULT, &mut result) };
        result
    }

    /// Runs `draw` with rendering made conditional on this query's outcome.
    pub fn conditional<F: FnOnce()>(&self, mode: GLenum, draw: F) {
        unsafe { gl::BeginConditionalRender(self.id, mode) };
        draw();
        unsafe { gl::EndConditionalRender() };
    }
}

impl Drop for Query {
    fn drop(&mut self) {
        unsafe { gl::DeleteQueries(1, &self.id) };
    }
}
