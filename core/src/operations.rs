use rand::RngCore;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SPRITE_HEIGHT, FONT_START, PIXEL_ON, STACK_SIZE,
};
use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::state::State;

/// Every handler runs with the pc already bumped past its own instruction.
pub type Result = std::result::Result<(), Chip8Error>;

/// native call; ignored
pub fn sys(_op: u16, _state: &mut State, _rng: &mut dyn RngCore) -> Result {
    Ok(())
}

/// clear
pub fn clr(_op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if state.sp == 0 {
        return Err(Chip8Error::StackUnderflow {
            pc: state.current_pc(),
        });
    }
    state.sp -= 1;
    state.pc = state.stack[usize::from(state.sp)];
    Ok(())
}

/// PC = addr
pub fn jump(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if usize::from(state.sp) >= STACK_SIZE {
        return Err(Chip8Error::StackOverflow {
            pc: state.current_pc(),
        });
    }
    state.stack[usize::from(state.sp)] = state.pc;
    state.sp += 1;
    state.pc = op.addr();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if state.v[op.x()] == op.kk() {
        state.skip();
    }
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if state.v[op.x()] != op.kk() {
        state.skip();
    }
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if state.v[op.x()] == state.v[op.y()] {
        state.skip();
    }
    Ok(())
}

/// Vx = kk
pub fn load(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.v[op.x()] = op.kk();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it, VF is untouched
pub fn add(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

/// Vx += Vy; VF = carry
///
/// The flag is written last so that it wins when x is F.
pub fn addr(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let sum = u16::from(state.v[op.x()]) + u16::from(state.v[op.y()]);
    state.v[op.x()] = sum as u8;
    state.set_flag(sum > 0xFF);
    Ok(())
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.set_flag(vx >= vy);
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.set_flag(vy >= vx);
    Ok(())
}

/// Vx = Vy >> 1; VF = Vy & 0x1
pub fn shr(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let vy = state.v[op.y()];
    state.v[op.x()] = vy >> 1;
    state.set_flag(vy & 0x1 == 0x1);
    Ok(())
}

/// Vx >>= 1; VF = Vx & 0x1
pub fn shr_vx(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx >> 1;
    state.set_flag(vx & 0x1 == 0x1);
    Ok(())
}

/// Vx = Vy << 1; VF = Vy >> 7
pub fn shl(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let vy = state.v[op.y()];
    state.v[op.x()] = vy << 1;
    state.set_flag(vy & 0x80 == 0x80);
    Ok(())
}

/// Vx <<= 1; VF = Vx >> 7
pub fn shl_vx(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx << 1;
    state.set_flag(vx & 0x80 == 0x80);
    Ok(())
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if state.v[op.x()] != state.v[op.y()] {
        state.skip();
    }
    Ok(())
}

/// I = addr
pub fn loadi(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.pc = op.addr() + u16::from(state.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &mut State, rng: &mut dyn RngCore) -> Result {
    let rand_byte = (rng.next_u32() & 0xFF) as u8;
    state.v[op.x()] = rand_byte & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n onto the FrameBuffer.
///
/// The origin wraps around the screen but the sprite itself is clipped at the right and bottom
/// edges. VF is set if any lit pixel gets erased.
pub fn draw(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let origin_x = usize::from(state.v[op.x()]) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.v[op.y()]) % DISPLAY_HEIGHT;
    let mut collision = false;

    for row in 0..usize::from(op.n()) {
        let y = origin_y + row;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        let sprite_byte = state.read(state.i.wrapping_add(row as u16));
        for bit in 0..8 {
            let x = origin_x + bit;
            if x >= DISPLAY_WIDTH {
                break;
            }
            if sprite_byte & (0x80 >> bit) != 0 {
                let pixel = &mut state.frame_buffer[y][x];
                collision |= *pixel == PIXEL_ON;
                *pixel ^= PIXEL_ON;
            }
        }
    }

    state.set_flag(collision);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if state.keypad[usize::from(state.v[op.x()] & 0xF)] {
        state.skip();
    }
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    if !state.keypad[usize::from(state.v[op.x()] & 0xF)] {
        state.skip();
    }
    Ok(())
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.v[op.x()] = state.delay_timer;
    Ok(())
}

/// await keypress for Vx
///
/// Nothing pressed rewinds the pc so this instruction runs again next cycle.
pub fn keyd(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    match state.keypad.iter().position(|&pressed| pressed) {
        Some(key) => state.v[op.x()] = key as u8,
        None => state.pc = state.current_pc(),
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.delay_timer = state.v[op.x()];
    Ok(())
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.sound_timer = state.v[op.x()];
    Ok(())
}

/// I += Vx
pub fn addi(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    Ok(())
}

/// I = FONT + Vx * 5
/// Set I to the memory address of the font sprite for Vx
pub fn ldspr(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    state.i = FONT_START + u16::from(state.v[op.x()]) * FONT_SPRITE_HEIGHT;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store the hundreds, tens and ones digits of Vx starting at address i
pub fn bcd(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    let mut value = state.v[op.x()];
    for offset in (0..3).rev() {
        state.write(state.i.wrapping_add(offset), value % 10);
        value /= 10;
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(op: u16, state: &mut State, rng: &mut dyn RngCore) -> Result {
    stor_keep_i(op, state, rng)?;
    state.i = state.i.wrapping_add(op.x() as u16 + 1);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor_keep_i(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    for register in 0..=op.x() {
        state.write(state.i.wrapping_add(register as u16), state.v[register]);
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(op: u16, state: &mut State, rng: &mut dyn RngCore) -> Result {
    read_keep_i(op, state, rng)?;
    state.i = state.i.wrapping_add(op.x() as u16 + 1);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read_keep_i(op: u16, state: &mut State, _rng: &mut dyn RngCore) -> Result {
    for register in 0..=op.x() {
        state.v[register] = state.read(state.i.wrapping_add(register as u16));
    }
    Ok(())
}

/// Counts the lit pixels in a frame, handy when checking draws
#[cfg(test)]
pub fn lit_pixels(frame: &crate::state::FrameBuffer) -> usize {
    frame
        .iter()
        .flat_map(|row| row.iter())
        .filter(|&&pixel| pixel == PIXEL_ON)
        .count()
}
