use super::*;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    /// Queues `callback` to run once `delay_ms` of virtual time has passed.
    /// Negative delays count as zero.
    pub fn set_timeout<F>(&mut self, delay_ms: i64, label: &str, callback: F) -> TimerId
    where
        F: FnOnce(&mut Page) -> Result<()> + 'static,
    {
        let id = self.scheduler.schedule(delay_ms, label, Box::new(callback));
        self.trace_timer_line(format!(
            "[timer] schedule id={} label={} delay_ms={} now_ms={}",
            id.0,
            label,
            delay_ms.max(0),
            self.scheduler.now_ms
        ));
        id
    }

    /// Cancels a pending timer. Returns `false` when it already ran or never existed.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let existed = self.scheduler.cancel(id);
        self.trace_timer_line(format!("[timer] clear id={} existed={existed}", id.0));
        existed
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        let to = from.saturating_add(delta_ms);
        let ran = self.run_timer_queue(Some(to), true)?;
        self.scheduler.now_ms = to;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={to} ran_due={ran}"
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(Some(target_ms), true)?;
        self.scheduler.now_ms = target_ms;
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    /// Runs every queued timer, including ones scheduled while flushing,
    /// moving the clock forward to each due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.scheduler.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };

        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    /// Runs the timers already due at the current time without moving the clock.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.scheduler.step_limit_error(steps, due_limit));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} label={} due_at={} now_ms={}",
            task.id.0, task.label, task.due_at, self.scheduler.now_ms
        ));
        (task.callback)(self)
    }
}
